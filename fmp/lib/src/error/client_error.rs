//! Transport and cancellation errors.

use thiserror::Error;

/// Errors from the transport layer.
///
/// A `ClientError` means no response was obtained. Remote failures that do
/// produce an HTTP response (4xx, 5xx) are returned as responses, not errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be built.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Network failure that survived the retry policy.
    #[error("Transport failed after retries: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The caller cancelled the call context.
    #[error("Request cancelled")]
    Cancelled,

    /// The call context deadline elapsed before a response arrived.
    #[error("Request deadline exceeded")]
    DeadlineExceeded,
}

impl ClientError {
    /// Returns `true` if the call was stopped by its context rather than by
    /// a network failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Returns `true` if the underlying failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
            Self::Transport(e) => transport_timed_out(e),
            Self::Cancelled => false,
            Self::DeadlineExceeded => true,
        }
    }

    /// Returns the HTTP status code carried by the underlying error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Transport(reqwest_middleware::Error::Reqwest(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Middleware may wrap the final attempt's error (the retry layer does), so
/// the cause chain is searched as well.
fn transport_timed_out(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => e.chain().any(|cause| {
            if let Some(inner) = cause.downcast_ref::<reqwest::Error>() {
                return inner.is_timeout();
            }
            matches!(
                cause.downcast_ref::<reqwest_middleware::Error>(),
                Some(reqwest_middleware::Error::Reqwest(inner)) if inner.is_timeout()
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_cancellation() {
        assert!(ClientError::Cancelled.is_cancellation());
        assert!(!ClientError::Cancelled.is_timeout());
    }

    #[test]
    fn test_deadline_is_cancellation_and_timeout() {
        let err = ClientError::DeadlineExceeded;
        assert!(err.is_cancellation());
        assert!(err.is_timeout());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ClientError::Cancelled.to_string(), "Request cancelled");
        assert_eq!(
            ClientError::DeadlineExceeded.to_string(),
            "Request deadline exceeded"
        );
    }
}
