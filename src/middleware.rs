//! Request logging middleware for reqwest.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest_middleware::{Middleware, Next, Result};
use std::time::Instant;

/// Middleware that logs every subscription request and how it ended.
///
/// The response is passed through untouched; its status is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLogMiddleware;

#[async_trait]
impl Middleware for RequestLogMiddleware {
    async fn handle(
        &self,
        req: reqwest::Request,
        extensions: &mut http::Extensions,
        next: Next<'_>,
    ) -> Result<reqwest::Response> {
        let url = req.url().clone();
        debug!("{} {}", req.method(), url);

        let start = Instant::now();
        let result = next.run(req, extensions).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(response) => {
                info!("Fetched {} ({}, {:.2}s)", url, response.status(), elapsed);
            }
            Err(e) => {
                warn!("Request to {} failed after {:.2}s: {}", url, elapsed, e);
            }
        }

        result
    }
}
