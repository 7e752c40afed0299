pub mod course_loader;
pub mod course_screen;
pub mod image_loader;
