//! HTTP transport: retrying execution, debug tracing and body buffering.
//!
//! Middleware order, outermost first:
//!
//! 1. [`ApiKeyInjector`] attaches the key once per call
//! 2. the retry layer clones the authenticated request for every attempt
//! 3. [`trace::DebugTrace`] (debug mode only) logs each attempt verbatim
//! 4. [`buffer::BufferBody`] reads the full body, so a failed read is a
//!    failed attempt
//!
//! Idempotent methods go through the retrying stack; everything else goes
//! through a single-shot stack that never resends.

mod buffer;
mod retry;
mod trace;

pub use retry::{
    FixedInterval, RetryConfig, RetryEligibility, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_WAIT,
};

use std::time::Duration;

use reqwest::{Request, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use tracing::{debug, instrument, Span};

use crate::auth::ApiKeyInjector;
use crate::context::CallContext;
use crate::error::{ClientError, ConfigError};
use crate::method::RestMethod;
use crate::response::RawResponse;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes prepared requests and returns fully buffered responses.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    retrying: ClientWithMiddleware,
    single_shot: ClientWithMiddleware,
    retry: RetryConfig,
    debug: bool,
}

impl Transport {
    /// Builds the middleware stacks around a fresh connection pool.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying client cannot be
    /// constructed (e.g. the TLS backend fails to initialize).
    pub fn new(
        auth: ApiKeyInjector,
        retry: RetryConfig,
        timeout: Duration,
        debug: bool,
    ) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        let retrying = Self::stack(&http, &auth, Some(&retry), debug);
        let single_shot = Self::stack(&http, &auth, None, debug);

        Ok(Self {
            http,
            retrying,
            single_shot,
            retry,
            debug,
        })
    }

    fn stack(
        http: &reqwest::Client,
        auth: &ApiKeyInjector,
        retry: Option<&RetryConfig>,
        debug: bool,
    ) -> ClientWithMiddleware {
        let mut builder = ClientBuilder::new(http.clone()).with(auth.clone());
        if let Some(retry) = retry {
            builder = builder.with(retry.middleware());
        }
        if debug {
            builder = builder.with(trace::DebugTrace);
        }
        builder.with(buffer::BufferBody).build()
    }

    /// Returns the retry settings in effect.
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Returns `true` when verbatim request/response logging is on.
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Builds a request with `params` serialized into the query string.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Request`] if the parameters cannot be encoded as
    /// a query string.
    pub fn build_request<P>(
        &self,
        method: RestMethod,
        url: Url,
        params: &P,
    ) -> Result<Request, ClientError>
    where
        P: Serialize + ?Sized,
    {
        Ok(self
            .http
            .request(method.to_reqwest(), url)
            .query(params)
            .build()?)
    }

    /// Sends `request` and buffers the whole body.
    ///
    /// The call (every attempt and every retry wait) is bounded by `ctx`.
    /// Any HTTP response is returned as `Ok`, whatever its status.
    ///
    /// ## Errors
    ///
    /// - [`ClientError::Cancelled`] / [`ClientError::DeadlineExceeded`] when
    ///   `ctx` ends first
    /// - [`ClientError::Transport`] when the last attempt fails without a
    ///   complete response (body included)
    #[instrument(
        name = "fmp_request",
        skip(self, ctx, request),
        fields(
            http.method = %request.method(),
            http.path = %request.url().path(),
            http.status_code = tracing::field::Empty,
            otel.kind = "client"
        )
    )]
    pub async fn execute(
        &self,
        ctx: &CallContext,
        request: Request,
    ) -> Result<RawResponse, ClientError> {
        let client = match RestMethod::from_reqwest(request.method()) {
            Some(method) if method.is_idempotent() => &self.retrying,
            _ => &self.single_shot,
        };

        let response = ctx
            .run(async {
                let response = client.execute(request).await?;
                let status = response.status();
                let version = response.version();
                let headers = response.headers().clone();
                // Already in memory: the innermost layer buffered it.
                let body = response.bytes().await?;
                Ok::<_, ClientError>(
                    RawResponse::new(status, headers, body).with_version(version),
                )
            })
            .await?;

        Span::current().record("http.status_code", response.status().as_u16());
        if self.debug {
            debug!(
                bytes = response.content_length(),
                body = %response.text(),
                "fmp response body"
            );
        }

        Ok(response)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("retry", &self.retry)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
