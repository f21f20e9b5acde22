//! Client configuration.

use std::time::Duration;

use crate::auth::ApiKeyLocation;
use crate::transport::{RetryConfig, DEFAULT_TIMEOUT};

/// Environment variable the CLI reads the API key from.
pub const API_KEY_ENV: &str = "FMP_API_KEY";

/// Settings for [`Client::new`](crate::Client::new).
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use fmp_lib::{ClientConfig, RetryConfig};
///
/// let config = ClientConfig::new("my-key")
///     .with_endpoint("http://localhost:8080/stable")
///     .with_debug(true)
///     .with_retry(RetryConfig::new(2, Duration::from_secs(1)))
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/stable"));
/// assert!(!format!("{config:?}").contains("my-key"));
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Base URL override. `None` or an empty string selects the first server
    /// in the embedded API description.
    pub endpoint: Option<String>,
    /// Log every request and response verbatim at debug level.
    pub debug: bool,
    /// Where the key is carried.
    pub api_key_location: ApiKeyLocation,
    /// Retry behaviour for idempotent requests.
    pub retry: RetryConfig,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config with the default endpoint, retries and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
            debug: false,
            api_key_location: ApiKeyLocation::default(),
            retry: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Enables or disables verbatim request/response logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets where the API key is carried.
    #[must_use]
    pub fn with_api_key_location(mut self, location: ApiKeyLocation) -> Self {
        self.api_key_location = location;
        self
    }

    /// Sets the retry behaviour.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the endpoint override if it is set and non-blank.
    pub fn endpoint_override(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("debug", &self.debug)
            .field("api_key_location", &self.api_key_location)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}
