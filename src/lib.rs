//! Loads a remote list of courses and publishes it to a read-only view.

pub mod config;
pub mod core;
pub mod error;
pub mod http;
pub mod model;
