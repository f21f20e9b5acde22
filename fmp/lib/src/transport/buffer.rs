//! Reads the whole body inside each attempt.
//!
//! Installed innermost, so a connection that drops mid-body (or an attempt
//! that times out while streaming) surfaces as an `Err` to the retry layer
//! instead of escaping it after the headers arrived.

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BufferBody;

#[async_trait::async_trait]
impl Middleware for BufferBody {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let response = next.run(req, extensions).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(reqwest_middleware::Error::Reqwest)?;

        let mut buffered = http::Response::new(body);
        *buffered.status_mut() = status;
        *buffered.version_mut() = version;
        *buffered.headers_mut() = headers;
        Ok(Response::from(buffered))
    }
}
