//! API key injection.
//!
//! [`ApiKeyInjector`] is validated once when the client is built and then
//! applied to every outgoing request as a middleware, before the retry layer,
//! so each attempt carries the key.

use http::Extensions;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

use crate::error::ConfigError;

/// Query parameter name FMP expects the key under.
pub const DEFAULT_API_KEY_PARAM: &str = "apikey";

/// Where the API key is carried on the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyLocation {
    /// Append `name=<key>` to the query string.
    Query(String),
    /// Send the key in the named header.
    Header(String),
}

impl Default for ApiKeyLocation {
    fn default() -> Self {
        Self::Query(DEFAULT_API_KEY_PARAM.to_string())
    }
}

#[derive(Clone)]
enum Injection {
    Query { name: String, key: String },
    Header { name: HeaderName, value: HeaderValue },
}

/// Request hook that attaches a static API key.
///
/// ## Examples
///
/// ```rust
/// use fmp_lib::auth::{ApiKeyInjector, ApiKeyLocation};
///
/// let injector = ApiKeyInjector::new(ApiKeyLocation::default(), "secret").unwrap();
/// let mut request = reqwest::Request::new(
///     reqwest::Method::GET,
///     "https://financialmodelingprep.com/stable/profile?symbol=AAPL".parse().unwrap(),
/// );
/// injector.apply(&mut request);
/// assert_eq!(request.url().query(), Some("symbol=AAPL&apikey=secret"));
/// ```
#[derive(Clone)]
pub struct ApiKeyInjector {
    injection: Injection,
}

impl ApiKeyInjector {
    /// Validates the key and location.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingApiKey`] if `key` is empty
    /// - [`ConfigError::InvalidApiKey`] if `key` contains whitespace or control
    ///   characters, or is not a valid header value
    /// - [`ConfigError::InvalidParamName`] if the parameter or header name is
    ///   empty or not a valid header name
    pub fn new(location: ApiKeyLocation, key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::InvalidApiKey);
        }

        let injection = match location {
            ApiKeyLocation::Query(name) => {
                if name.trim().is_empty() {
                    return Err(ConfigError::InvalidParamName { name });
                }
                Injection::Query { name, key }
            }
            ApiKeyLocation::Header(name) => {
                let header = HeaderName::try_from(name.as_str())
                    .map_err(|_| ConfigError::InvalidParamName { name: name.clone() })?;
                let mut value =
                    HeaderValue::try_from(key.as_str()).map_err(|_| ConfigError::InvalidApiKey)?;
                value.set_sensitive(true);
                Injection::Header {
                    name: header,
                    value,
                }
            }
        };

        Ok(Self { injection })
    }

    /// Attaches the key to `request`. Never fails.
    pub fn apply(&self, request: &mut Request) {
        match &self.injection {
            Injection::Query { name, key } => {
                request.url_mut().query_pairs_mut().append_pair(name, key);
            }
            Injection::Header { name, value } => {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
    }
}

impl std::fmt::Debug for ApiKeyInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = match &self.injection {
            Injection::Query { name, .. } => format!("query:{name}"),
            Injection::Header { name, .. } => format!("header:{name}"),
        };
        f.debug_struct("ApiKeyInjector")
            .field("location", &location)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl Middleware for ApiKeyInjector {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        self.apply(&mut req);
        next.run(req, extensions).await
    }
}
