//! Retry Policy and Backoff
//!
//! Transport-level retry used by the API client. Whether retries happen
//! automatically is an explicit configuration, not a per-screen accident:
//! with `automatic` unset, failures surface immediately and recovery is
//! user-initiated (the timeline's per-message retry affordance).

use std::time::Duration;

/// Retry configuration for API requests
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retry transport failures automatically before surfacing them
    pub automatic: bool,
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay schedule between attempts
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// No automatic retries; every failure surfaces to the caller
    pub fn manual() -> Self {
        Self {
            automatic: false,
            ..Self::default()
        }
    }

    /// Retry transport failures automatically with the given schedule
    pub fn automatic(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            automatic: true,
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            automatic: false,
            max_attempts: 3,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(500),
                max: Duration::from_secs(5),
            },
        }
    }
}

/// Delay schedule between attempts
#[derive(Debug, Clone)]
pub enum Backoff {
    /// Same interval between every attempt
    Fixed { interval: Duration },
    /// Doubling interval, capped at `max`
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed { interval } => *interval,
            Backoff::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                base.saturating_mul(factor).min(*max)
            }
        }
    }
}
