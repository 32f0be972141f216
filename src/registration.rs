use crate::types::ErrorPayload;
use crate::types::constants::REGISTRATION_RETRY_BUDGET;
use std::time::Duration;

/// What the registration loop should do after a conflict.
#[derive(Debug, PartialEq)]
pub enum RetryDecision {
    /// Schedule another create attempt after this delay
    RetryAfter(Duration),
    /// Budget spent; fail with the last conflict payload
    GiveUp(ErrorPayload),
}

/// State of one registration call: attempt count, ceiling and the last
/// conflict the server reported. A fixed wall-clock budget divided by the
/// retry delay yields the maximum attempt count (30s / 2s = 15 by
/// default). Discarded once the call settles.
#[derive(Debug)]
pub struct RetryState {
    attempts: u32,
    max_attempts: u32,
    retry_delay: Duration,
    last_error: Option<ErrorPayload>,
}

impl RetryState {
    pub fn new(retry_delay: Duration) -> Self {
        Self::with_budget(REGISTRATION_RETRY_BUDGET, retry_delay)
    }

    pub fn with_budget(budget: Duration, retry_delay: Duration) -> Self {
        let max_attempts = (budget.as_secs() / retry_delay.as_secs().max(1)).max(1) as u32;
        Self {
            attempts: 0,
            max_attempts,
            retry_delay,
            last_error: None,
        }
    }

    /// Create attempts made so far that ended in a conflict.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn last_error(&self) -> Option<&ErrorPayload> {
        self.last_error.as_ref()
    }

    /// Record an id-conflict response and decide whether to go again.
    pub fn record_conflict(&mut self, error: ErrorPayload) -> RetryDecision {
        self.attempts += 1;
        self.last_error = Some(error.clone());
        if self.attempts >= self.max_attempts {
            RetryDecision::GiveUp(error)
        } else {
            RetryDecision::RetryAfter(self.retry_delay)
        }
    }
}
