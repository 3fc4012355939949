//! Retry policy for job submission

use crate::error::{Error, Result};
use crate::http::client::RawResponse;
use crate::types::DocHolidayResponse;
use std::time::Duration;

/// What to do after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// The attempt produced a job
    Succeed,
    /// The failure is terminal regardless of remaining attempts
    Fail,
    /// Sleep, then try again
    Retry(Duration),
    /// The failure is transient but no attempts remain
    Exhausted,
}

/// Bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles per attempt
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (numbered from 1)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Decide the next step from an attempt's classified outcome
    pub fn decide(&self, attempt: u32, outcome: &Result<DocHolidayResponse>) -> RetryDecision {
        match outcome {
            Ok(_) => RetryDecision::Succeed,
            Err(err) if !err.is_retryable() => RetryDecision::Fail,
            Err(_) if attempt < self.max_attempts => RetryDecision::Retry(self.delay_for(attempt)),
            Err(_) => RetryDecision::Exhausted,
        }
    }
}

/// Turn a raw exchange into a job or a typed failure
///
/// 401 and 429 are checked before the generic success test so their
/// dedicated handling always wins.
pub fn classify(exchange: Result<RawResponse>) -> Result<DocHolidayResponse> {
    let response = exchange?;
    match response.status {
        401 => Err(Error::AuthenticationFailed),
        429 => Err(Error::RateLimited(429)),
        200..=299 => Ok(serde_json::from_str(&response.body)?),
        status => Err(Error::Http {
            status,
            body: response.body,
        }),
    }
}
