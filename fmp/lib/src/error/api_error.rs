//! Top-level API error type.

use super::{ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// Non-success HTTP statuses are not errors at this level: they come back as a
/// normal [`RawResponse`](crate::RawResponse) for the caller to classify.
///
/// ## Examples
///
/// ```rust,ignore
/// use fmp_lib::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::UnknownOperation { operation } => eprintln!("no such operation: {operation}"),
///         ApiError::Client(e) if e.is_cancellation() => eprintln!("cancelled"),
///         ApiError::Client(e) => eprintln!("transport error: {e}"),
///         ApiError::Validation(e) => eprintln!("bad parameters: {e}"),
///         ApiError::Config(e) => eprintln!("misconfigured: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport errors (network failures surviving the retry policy, cancellation).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Parameter marshalling or decoding errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Dispatch was asked for an operation outside the known set.
    #[error("Unknown operation: {operation}")]
    UnknownOperation {
        /// The identifier exactly as the caller supplied it.
        operation: String,
    },
}

impl ApiError {
    /// Creates an unknown-operation error for the given identifier.
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }

    /// Returns `true` if the call was cancelled or ran past its deadline.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_cancellation())
    }
}
