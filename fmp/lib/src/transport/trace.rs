//! Verbatim request/response tracing for debug mode.
//!
//! Installed below the retry layer, so every attempt is logged, and above
//! body buffering, so a body that fails to arrive is logged as a failed attempt.
//! URLs are logged in full, API key included: debug output must not be fed to
//! shared log pipelines.

use std::time::Instant;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DebugTrace;

#[async_trait::async_trait]
impl Middleware for DebugTrace {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        debug!(
            http.method = %req.method(),
            http.url = %req.url(),
            http.headers = ?req.headers(),
            "fmp request"
        );

        let started = Instant::now();
        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => debug!(
                http.status_code = response.status().as_u16(),
                http.headers = ?response.headers(),
                elapsed_ms,
                "fmp response"
            ),
            Err(error) => debug!(%error, elapsed_ms, "fmp attempt failed"),
        }

        result
    }
}
