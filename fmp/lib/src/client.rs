//! Client construction and the request path shared by every endpoint.

use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use tracing::info;

use crate::auth::ApiKeyInjector;
use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::description::ApiDescription;
use crate::error::{ApiError, ConfigError};
use crate::operations::OperationId;
use crate::response::RawResponse;
use crate::transport::Transport;

/// Authenticated, retrying FMP client.
///
/// Cheap to clone; clones share the connection pool. Safe to use from many
/// tasks at once.
///
/// ## Examples
///
/// ```rust,no_run
/// use fmp_lib::{CallContext, Client, ClientConfig};
/// use fmp_lib::operations::SymbolParams;
///
/// # async fn run() -> Result<(), fmp_lib::ApiError> {
/// let client = Client::new(ClientConfig::new("my-api-key"))?;
/// let response = client
///     .profile(&CallContext::background(), &SymbolParams::new("AAPL"))
///     .await?;
/// println!("{}: {}", response.status(), response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    transport: Arc<Transport>,
}

impl Client {
    /// Builds a client from `config`.
    ///
    /// The base URL is the configured endpoint when it is non-blank, otherwise
    /// the first server of the embedded API description.
    ///
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] when the key is missing or malformed, the
    /// base URL is invalid or not http(s), the API description cannot supply
    /// a server, or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let base_url = resolve_base_url(config.endpoint_override())?;
        let auth = ApiKeyInjector::new(config.api_key_location.clone(), config.api_key.as_str())?;
        let transport = Transport::new(auth, config.retry, config.timeout, config.debug)?;

        info!(
            base_url = %base_url,
            debug = config.debug,
            max_retries = config.retry.max_retries,
            "FMP client configured"
        );

        Ok(Self {
            base_url,
            transport: Arc::new(transport),
        })
    }

    /// Base URL every operation path is appended to. Always ends in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Absolute URL for `operation`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the joined URL is invalid.
    pub fn endpoint_url(&self, operation: OperationId) -> Result<Url, ConfigError> {
        Ok(self
            .base_url
            .join(operation.path().trim_start_matches('/'))?)
    }

    pub(crate) async fn get<P>(
        &self,
        ctx: &CallContext,
        operation: OperationId,
        params: &P,
    ) -> Result<RawResponse, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let url = self.endpoint_url(operation)?;
        let request = self
            .transport
            .build_request(operation.method(), url, params)?;
        Ok(self.transport.execute(ctx, request).await?)
    }
}

fn resolve_base_url(endpoint: Option<&str>) -> Result<Url, ConfigError> {
    let mut url = match endpoint {
        Some(endpoint) => Url::parse(endpoint)?,
        None => Url::parse(ApiDescription::embedded()?.default_server_url()?)?,
    };

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }

    // `Url::join` replaces the last segment unless the base ends in a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_from_description() {
        let client = Client::new(ClientConfig::new("k")).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://financialmodelingprep.com/stable/"
        );
        assert_eq!(
            client.endpoint_url(OperationId::Profile).unwrap().as_str(),
            "https://financialmodelingprep.com/stable/profile"
        );
    }

    #[test]
    fn test_endpoint_override_wins() {
        let client =
            Client::new(ClientConfig::new("k").with_endpoint("http://127.0.0.1:9000")).unwrap();
        assert_eq!(
            client
                .endpoint_url(OperationId::HistoricalPriceEodFull)
                .unwrap()
                .as_str(),
            "http://127.0.0.1:9000/historical-price-eod/full"
        );
    }

    #[test]
    fn test_override_keeps_path_prefix() {
        let client =
            Client::new(ClientConfig::new("k").with_endpoint("http://proxy.local/fmp/stable"))
                .unwrap();
        assert_eq!(
            client.endpoint_url(OperationId::Quote).unwrap().as_str(),
            "http://proxy.local/fmp/stable/quote"
        );
    }

    #[test]
    fn test_empty_override_uses_default() {
        let client = Client::new(ClientConfig::new("k").with_endpoint("")).unwrap();
        assert_eq!(client.base_url().host_str(), Some("financialmodelingprep.com"));
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        let err = Client::new(ClientConfig::new("k").with_endpoint("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = Client::new(ClientConfig::new("k").with_endpoint("ftp://example.com")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme { ref scheme } if scheme == "ftp"));
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let err = Client::new(ClientConfig::new("")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone + 'static>() {}
        assert_traits::<Client>();
    }
}
