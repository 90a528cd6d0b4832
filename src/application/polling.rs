//! Fixed-interval polling with a wall-clock budget.
//!
//! `poll_until` calls a check immediately, then again every `interval`
//! while the check reports [`PollState::Pending`]. Once the elapsed time
//! exceeds `max_wait` the loop gives up without issuing another check.
//!
//! Timing goes through `tokio::time`, so tests run it on tokio's paused
//! clock and no real time passes.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Interval and budget for a polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two checks.
    pub interval: Duration,
    /// Elapsed time after which a still-pending check fails the loop.
    pub max_wait: Duration,
}

impl PollPolicy {
    /// Default delay between run status checks.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);
    /// Default budget for a run to reach a terminal status.
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(60);

    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_WAIT)
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState<T> {
    /// Done; stop polling with this value.
    Ready(T),
    /// Not done yet; check again after the interval.
    Pending,
}

/// Value produced by a successful poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polled<T> {
    pub value: T,
    /// Number of checks performed, including the final one.
    pub polls: u32,
}

/// Why a poll loop stopped without a value.
#[derive(Debug)]
pub enum PollError<E> {
    /// Budget exhausted while the check was still pending.
    TimedOut { polls: u32, waited: Duration },
    /// The check itself failed; the loop stops on the first error.
    Check(E),
}

impl<E: fmt::Display> fmt::Display for PollError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::TimedOut { polls, waited } => {
                write!(f, "still pending after {} polls ({:?})", polls, waited)
            }
            PollError::Check(err) => write!(f, "{}", err),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for PollError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PollError::TimedOut { .. } => None,
            PollError::Check(err) => Some(err),
        }
    }
}

/// Runs `check` until it is ready, fails, or the budget runs out.
pub async fn poll_until<T, E, F, Fut>(
    policy: PollPolicy,
    mut check: F,
) -> Result<Polled<T>, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollState<T>, E>>,
{
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        polls += 1;
        if let PollState::Ready(value) = check().await.map_err(PollError::Check)? {
            return Ok(Polled { value, polls });
        }

        let waited = started.elapsed();
        if waited > policy.max_wait {
            return Err(PollError::TimedOut { polls, waited });
        }

        sleep(policy.interval).await;
    }
}
