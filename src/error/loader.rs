use thiserror::Error;

/// Everything that can go wrong between building the request and decoding the body.
///
/// These never reach the view: `CourseLoader::load_all` logs them and keeps the
/// last published list.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("background fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

// Body read failures count as transport failures too
impl From<reqwest::Error> for LoaderError {
    fn from(err: reqwest::Error) -> Self {
        LoaderError::Transport(reqwest_middleware::Error::Reqwest(err))
    }
}

impl LoaderError {
    pub fn invalid_url(url: &str, source: url::ParseError) -> Self {
        LoaderError::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }

    pub fn is_invalid_url(&self) -> bool {
        matches!(self, LoaderError::InvalidUrl { .. })
    }
}
