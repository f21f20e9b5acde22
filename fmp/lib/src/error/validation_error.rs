//! Parameter marshalling and body decoding errors.

use thiserror::Error;

/// Errors while converting between loosely-typed and typed data.
///
/// `Encode` and `Decode` are raised by dispatch before any network call.
/// `JsonParse` is raised by the response decoding helpers.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The parameter bag could not be serialized to the intermediate form.
    #[error("Failed to encode parameters: {0}")]
    Encode(#[source] serde_json::Error),

    /// The parameter bag does not fit the operation's parameter shape.
    #[error("Invalid parameters for {operation}: {source}")]
    Decode {
        /// The operation whose parameter struct rejected the bag.
        operation: &'static str,
        /// The decoder's description of the mismatch.
        #[source]
        source: serde_json::Error,
    },

    /// A response body is not valid JSON for the requested type.
    #[error("JSON parse error: {0}")]
    JsonParse(#[source] serde_json::Error),
}

impl ValidationError {
    /// Returns `true` if this error was raised while preparing a request.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::Encode(_) | Self::Decode { .. })
    }
}
