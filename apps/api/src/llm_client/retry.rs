use std::time::Duration;

/// Retry policy for provider calls, injected into `LlmClient`.
///
/// Backoff is linear: the wait before the (n+1)-th attempt is `base_delay × n`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub retryable_status: fn(u16) -> bool,
}

/// Rate limits and server-side failures are worth another try; everything
/// else in the 4xx range means the request itself is wrong.
pub fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            retryable_status: is_transient_status,
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: u16) -> bool {
        (self.retryable_status)(status)
    }

    /// Delay to wait after `failed_attempts` failures (1-based). Zero before the first attempt.
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        self.base_delay * failed_attempts
    }

    /// Whether another attempt is allowed after `attempts_made` attempts.
    pub fn has_attempts_left(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts.max(1)
    }
}
