//! Client construction errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These are raised once, while building a [`Client`](crate::Client), and
/// indicate programmer or deployment errors. The caller decides whether to
/// abort.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was configured.
    #[error("Missing API key")]
    MissingApiKey,

    /// The API key cannot be carried in a URL or header.
    #[error("Invalid API key format")]
    InvalidApiKey,

    /// The query parameter or header name for the key is unusable.
    #[error("Invalid API key parameter name: {name:?}")]
    InvalidParamName {
        /// The rejected name.
        name: String,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL is not http or https.
    #[error("Unsupported URL scheme: {scheme}")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// The embedded API description could not be parsed.
    #[error("Invalid API description: {0}")]
    Description(#[from] serde_yaml::Error),

    /// The API description does not publish any server.
    #[error("API description has no servers")]
    NoServers,

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
