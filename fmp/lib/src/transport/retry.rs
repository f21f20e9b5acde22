//! Fixed-interval retry policy and explicit retry eligibility.
//!
//! Retries are delegated to `reqwest-retry`. This module supplies the two
//! decisions it needs: *when* to try again ([`FixedInterval`]) and *what*
//! counts as a retryable outcome ([`RetryEligibility`]). Non-idempotent
//! requests bypass the retry layer entirely (see
//! [`Transport`](super::Transport)).

use std::time::{Duration, SystemTime};

use reqwest::StatusCode;
use reqwest_retry::{
    RetryDecision, RetryPolicy, RetryTransientMiddleware, Retryable, RetryableStrategy,
};

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 100;

/// Default wait between attempts.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(60);

/// Retry up to `max_retries` times, waiting the same interval before each retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    max_retries: u32,
    wait: Duration,
}

impl FixedInterval {
    /// Creates a policy allowing `max_retries` retries spaced by `wait`.
    pub fn new(max_retries: u32, wait: Duration) -> Self {
        Self { max_retries, wait }
    }
}

impl RetryPolicy for FixedInterval {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        if n_past_retries < self.max_retries {
            RetryDecision::Retry {
                execute_after: SystemTime::now() + self.wait,
            }
        } else {
            RetryDecision::DoNotRetry
        }
    }
}

/// Which outcomes of an idempotent request are retried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryEligibility {
    /// Retry only when no response was received (connect errors, resets,
    /// timeouts). Every HTTP response, whatever its status, is final.
    #[default]
    TransportFailures,
    /// Also retry `408`, `429` and `5xx` responses.
    TransportAndServerErrors,
}

impl RetryEligibility {
    fn retries_status(self, status: StatusCode) -> bool {
        match self {
            Self::TransportFailures => false,
            Self::TransportAndServerErrors => {
                status.is_server_error()
                    || status == StatusCode::TOO_MANY_REQUESTS
                    || status == StatusCode::REQUEST_TIMEOUT
            }
        }
    }
}

impl RetryableStrategy for RetryEligibility {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Err(_) => Some(Retryable::Transient),
            Ok(response) if self.retries_status(response.status()) => Some(Retryable::Transient),
            Ok(_) => None,
        }
    }
}

/// Retry settings for a client.
///
/// The defaults are 100 retries, one minute apart, on transport failures
/// only. Use [`RetryConfig::none`] to disable retries.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use fmp_lib::{RetryConfig, RetryEligibility};
///
/// let retry = RetryConfig::new(3, Duration::from_millis(500))
///     .with_eligibility(RetryEligibility::TransportAndServerErrors);
/// assert_eq!(retry.max_attempts(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before each retry.
    pub wait: Duration,
    /// Outcomes that trigger a retry.
    pub eligibility: RetryEligibility,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            wait: DEFAULT_RETRY_WAIT,
            eligibility: RetryEligibility::default(),
        }
    }
}

impl RetryConfig {
    /// Creates a config with the given retry count and wait.
    pub fn new(max_retries: u32, wait: Duration) -> Self {
        Self {
            max_retries,
            wait,
            eligibility: RetryEligibility::default(),
        }
    }

    /// A config that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Sets which outcomes are retried.
    #[must_use]
    pub fn with_eligibility(mut self, eligibility: RetryEligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Total attempts, including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Returns the wait policy.
    pub fn policy(&self) -> FixedInterval {
        FixedInterval::new(self.max_retries, self.wait)
    }

    pub(crate) fn middleware(&self) -> RetryTransientMiddleware<FixedInterval, RetryEligibility> {
        RetryTransientMiddleware::new_with_policy_and_strategy(self.policy(), self.eligibility)
    }
}
