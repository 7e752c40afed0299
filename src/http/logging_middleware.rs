use std::time::Instant;

use http::Extensions;
use log::{debug, warn};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

/// Logs method, url, status and elapsed time of every outgoing request.
pub struct LoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let method = req.method().clone();
        let url = req.url().clone();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        match &result {
            Ok(response) => debug!(
                "{} {} -> {} ({:?})",
                method,
                url,
                response.status(),
                started.elapsed()
            ),
            Err(err) => warn!("{} {} failed after {:?}: {}", method, url, started.elapsed(), err),
        }
        result
    }
}
