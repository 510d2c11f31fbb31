use std::time::Duration;

use crate::constants::*;

/// Classification of one outbound call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptOutcome {
    /// endpoint answered 200
    Delivered,
    /// endpoint answered 4xx, retrying will not help
    PermanentRejection,
    /// 5xx, timeout, network error or unexpected status
    TransientError,
}

/// Final state of a delivery, each maps to exactly one persistence write
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalOutcome {
    Sent,
    Failed,
    FailedPermanent,
}

#[derive(Debug, PartialEq)]
pub enum NextStep {
    Terminal(TerminalOutcome),
    RetryAfter(Duration),
}

/// Retry protocol for a single message delivery, kept pure so the attempt
/// sequence is testable without a clock or an endpoint. The driver owns the
/// outbound call, the backoff sleep and the single terminal persistence write.
#[derive(Debug)]
pub struct RetryState {
    attempts: u32,
}

impl RetryState {
    pub fn new() -> Self {
        Self { attempts: 0 }
    }

    /// Number of outbound calls made so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Records the outcome of one attempt and decides what happens next
    pub fn record(&mut self, outcome: AttemptOutcome) -> NextStep {
        self.attempts += 1;
        match outcome {
            AttemptOutcome::Delivered => NextStep::Terminal(TerminalOutcome::Sent),
            AttemptOutcome::PermanentRejection => {
                NextStep::Terminal(TerminalOutcome::FailedPermanent)
            }
            AttemptOutcome::TransientError => {
                if self.attempts >= MAX_SEND_ATTEMPTS {
                    NextStep::Terminal(TerminalOutcome::Failed)
                } else {
                    NextStep::RetryAfter(backoff_delay(self.attempts))
                }
            }
        }
    }
}

/// Backoff before the next attempt, attempts beyond the mapping reuse the
/// last interval
fn backoff_delay(attempts_made: u32) -> Duration {
    let idx = attempts_made.saturating_sub(1) as usize;
    let secs = RETRY_BACKOFF_SECS
        .get(idx)
        .copied()
        .unwrap_or(RETRY_BACKOFF_SECS[RETRY_BACKOFF_SECS.len() - 1]);
    Duration::from_secs(secs)
}
