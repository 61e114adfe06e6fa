//! Retry configuration types.

use std::time::Duration;
use userdata_core::{Result, UserdataError};

/// Default pause between attempts
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Default ceiling for exponential backoff
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// What bounds a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    /// Give up after this many requests
    Attempts(u32),

    /// Give up once this much time has passed since the first request
    Deadline(Duration),

    /// Give up on whichever limit is reached first
    AttemptsWithin {
        /// Maximum number of requests
        attempts: u32,
        /// Overall time limit
        deadline: Duration,
    },

    /// Retry until success. Only a cancellation token ends the loop
    /// otherwise.
    Unbounded,
}

/// Retry configuration for a userdata fetch
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempt and/or time limit
    pub budget: RetryBudget,

    /// Pause after a failed attempt
    pub delay: Duration,

    /// Upper bound on the pause when backing off exponentially
    pub max_delay: Duration,

    /// Double the pause after every failed attempt
    pub exponential: bool,
}

impl RetryConfig {
    /// Create a retry configuration with the given budget and a fixed delay
    #[must_use]
    pub const fn new(budget: RetryBudget) -> Self {
        Self {
            budget,
            delay: DEFAULT_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            exponential: false,
        }
    }

    /// Bound the fetch by a number of requests
    #[must_use]
    pub const fn attempts(max: u32) -> Self {
        Self::new(RetryBudget::Attempts(max))
    }

    /// Bound the fetch by an overall deadline
    #[must_use]
    pub const fn deadline(deadline: Duration) -> Self {
        Self::new(RetryBudget::Deadline(deadline))
    }

    /// Retry until success or cancellation
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(RetryBudget::Unbounded)
    }

    /// Add an overall deadline to the current budget
    #[must_use]
    pub const fn within(mut self, deadline: Duration) -> Self {
        self.budget = match self.budget {
            RetryBudget::Attempts(attempts)
            | RetryBudget::AttemptsWithin { attempts, .. } => {
                RetryBudget::AttemptsWithin { attempts, deadline }
            }
            RetryBudget::Deadline(_) | RetryBudget::Unbounded => RetryBudget::Deadline(deadline),
        };
        self
    }

    /// Set the pause between attempts
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the backoff ceiling
    #[must_use]
    pub const fn max_delay(mut self, max: Duration) -> Self {
        self.max_delay = max;
        self
    }

    /// Enable or disable exponential backoff
    #[must_use]
    pub const fn exponential(mut self, enabled: bool) -> Self {
        self.exponential = enabled;
        self
    }

    /// Check that the budget can ever allow a request
    pub fn validate(&self) -> Result<()> {
        match self.budget {
            RetryBudget::Attempts(0) | RetryBudget::AttemptsWithin { attempts: 0, .. } => Err(
                UserdataError::Config("retry budget must allow at least one attempt".into()),
            ),
            RetryBudget::Deadline(d) | RetryBudget::AttemptsWithin { deadline: d, .. }
                if d.is_zero() =>
            {
                Err(UserdataError::Config("retry deadline must be non-zero".into()))
            }
            _ => Ok(()),
        }
    }

    /// Pause to take after the given number of failed attempts (1-based)
    #[must_use]
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        if !self.exponential {
            return self.delay;
        }
        let factor = 2u32.saturating_pow(failed_attempts.saturating_sub(1));
        self.delay.saturating_mul(factor).min(self.max_delay)
    }

    /// The overall deadline, if the budget has one
    #[must_use]
    pub const fn overall_deadline(&self) -> Option<Duration> {
        match self.budget {
            RetryBudget::Deadline(d) | RetryBudget::AttemptsWithin { deadline: d, .. } => Some(d),
            RetryBudget::Attempts(_) | RetryBudget::Unbounded => None,
        }
    }

    /// Time left before the deadline, or `None` when there is no deadline
    #[must_use]
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.overall_deadline()
            .map(|deadline| deadline.saturating_sub(elapsed))
    }

    /// Returns true if no further attempt may start, given how many have
    /// been made and when the next one would begin
    #[must_use]
    pub fn is_exhausted(&self, attempts: u32, next_start: Duration) -> bool {
        let out_of_attempts = match self.budget {
            RetryBudget::Attempts(max) | RetryBudget::AttemptsWithin { attempts: max, .. } => {
                attempts >= max
            }
            RetryBudget::Deadline(_) | RetryBudget::Unbounded => false,
        };
        let out_of_time = self
            .overall_deadline()
            .is_some_and(|deadline| next_start >= deadline);

        out_of_attempts || out_of_time
    }
}
