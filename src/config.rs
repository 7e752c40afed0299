use std::time::Duration;

pub const COURSES_ENDPOINT: &str = "https://api.letsbuildthatapp.com/jsondecodable/courses";

pub const DEFAULT_USER_AGENT: &str = concat!("course_feed/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP client and the course endpoint.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub endpoint: String,
    pub user_agent: String,
    /// `None` keeps the client's own default (no overall timeout).
    pub timeout: Option<Duration>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            endpoint: COURSES_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl FeedConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
