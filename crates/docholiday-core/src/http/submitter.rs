//! Job submission with bounded retry

use crate::error::{Error, Result};
use crate::host::ActionHost;
use crate::http::client::{jobs_endpoint, Transport};
use crate::http::retry::{classify, RetryDecision, RetryPolicy};
use crate::types::{DocHolidayRequest, DocHolidayResponse};

/// Posts job requests to the jobs endpoint
#[derive(Debug)]
pub struct JobSubmitter<T> {
    transport: T,
    endpoint: String,
    policy: RetryPolicy,
}

impl<T: Transport> JobSubmitter<T> {
    /// Create a submitter for the API at `base_url`
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            endpoint: jobs_endpoint(base_url),
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit a job, retrying transient failures
    ///
    /// Each retry is announced through `host` as a warning. The body is
    /// encoded once and sent unchanged on every attempt.
    pub async fn submit<H: ActionHost + ?Sized>(
        &self,
        host: &H,
        token: &str,
        request: &DocHolidayRequest,
    ) -> Result<DocHolidayResponse> {
        let body = serde_json::to_string(request).map_err(|e| Error::Encode(e.to_string()))?;
        let mut attempt = 1;

        loop {
            tracing::debug!(attempt, endpoint = %self.endpoint, "Submitting job request");
            let outcome = classify(self.transport.post_json(&self.endpoint, token, &body).await);

            match (self.policy.decide(attempt, &outcome), outcome) {
                (_, Ok(response)) => return Ok(response),
                (RetryDecision::Retry(delay), Err(err)) => {
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Job request failed, backing off"
                    );
                    host.warning(&format!(
                        "Attempt {} failed: {}. Retrying in {}ms...",
                        attempt,
                        err,
                        delay.as_millis()
                    ));
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                (RetryDecision::Exhausted, Err(err)) => {
                    return Err(Error::RequestFailedAfterRetries {
                        attempts: attempt,
                        last: Box::new(err),
                    })
                }
                (_, Err(err)) => return Err(err),
            }
        }
    }
}
