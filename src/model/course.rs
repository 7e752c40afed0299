use serde::{Deserialize, Serialize};

/// One course: a list entry with a title and a cover image url.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Course {
    pub name: String,

    /// Wire name is "imageUrl"
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Replaced wholesale on every successful load, never merged.
pub type CourseList = Vec<Course>;

/// Decodes a response body that must be a JSON array of courses.
///
/// Any element missing `name` or `imageUrl` rejects the whole body.
pub fn decode_courses(body: &[u8]) -> Result<CourseList, serde_json::Error> {
    serde_json::from_slice(body)
}
