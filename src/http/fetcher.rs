use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

use crate::config::FeedConfig;
use crate::error::loader::LoaderError;
use crate::http::logging_middleware::LoggingMiddleware;

/// One GET returning the raw body.
///
/// The loaders only depend on this trait, so tests can answer requests
/// without touching the network.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, LoaderError>;
}

pub struct HttpFetcher {
    client: ClientWithMiddleware,
}

impl HttpFetcher {
    pub fn new(config: &FeedConfig) -> Result<Self, LoaderError> {
        Ok(HttpFetcher {
            client: build_client(config)?,
        })
    }
}

pub fn build_client(config: &FeedConfig) -> Result<ClientWithMiddleware, LoaderError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, image/*"));

    let mut builder = Client::builder()
        .default_headers(headers)
        .user_agent(config.user_agent.clone());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    Ok(ClientBuilder::new(client).with(LoggingMiddleware).build())
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, LoaderError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn builds_client_with_and_without_timeout() {
        assert!(HttpFetcher::new(&FeedConfig::default()).is_ok());

        let config = FeedConfig::default().with_timeout(Some(Duration::from_secs(3)));
        assert!(build_client(&config).is_ok());
    }
}
