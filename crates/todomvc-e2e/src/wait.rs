//! Wait policy and polling.
//!
//! Actionability waits and assertion retries both go through [`poll_until`],
//! driven by an explicit [`WaitPolicy`] instead of whatever default the
//! underlying driver happens to use.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

use crate::result::TodoResult;

/// Default timeout for waits and assertions (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default navigation timeout (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// How long to keep polling and how often
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitPolicy {
    /// Total time budget in milliseconds
    pub timeout_ms: u64,
    /// Delay between attempts in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitPolicy {
    /// Create a policy with the given timeout and the default interval
    #[must_use]
    pub const fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Short timeout, fast polling (in-memory drivers)
    #[must_use]
    pub const fn fast() -> Self {
        Self {
            timeout_ms: 500,
            poll_interval_ms: 25,
        }
    }

    /// Long timeout, slower polling (slow networks, CI)
    #[must_use]
    pub const fn slow() -> Self {
        Self {
            timeout_ms: 30_000,
            poll_interval_ms: 250,
        }
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Result of a single sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample<T> {
    /// Condition met
    Ready(T),
    /// Not yet; carries what was observed
    Pending(String),
}

/// Result of polling to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// Condition met within the budget
    Ready(T),
    /// Budget exhausted
    TimedOut {
        /// Last observation before giving up
        last: String,
    },
}

/// Poll `sample` until it is ready or the policy's timeout elapses.
///
/// Driver errors count as pending observations (the element may not have
/// rendered yet); configuration errors abort immediately. The sample always
/// runs at least once.
pub async fn poll_until<T, F, Fut>(policy: &WaitPolicy, mut sample: F) -> TodoResult<PollOutcome<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TodoResult<Sample<T>>>,
{
    let start = Instant::now();
    loop {
        let last = match sample().await {
            Ok(Sample::Ready(value)) => return Ok(PollOutcome::Ready(value)),
            Ok(Sample::Pending(observed)) => observed,
            Err(e) if e.is_config() => return Err(e),
            Err(e) => e.to_string(),
        };

        if start.elapsed() >= policy.timeout() {
            return Ok(PollOutcome::TimedOut { last });
        }
        tokio::time::sleep(policy.poll_interval()).await;
    }
}
