//! Bounded busy-wait polling.
//!
//! All four wait sites in the engine (COREX idle, core idle, two
//! interrupt-clear waits) go through [`poll_until`] so the retry budget
//! and the delay granularity live in exactly one place. Real hardware
//! timing depends on the delay increment, not just the total deadline, so
//! both are part of the contract: a never-ready target sees exactly
//! `max_iterations` predicate evaluations, each followed by one delay.

use crate::error::{CstatError, Result};
use std::time::Duration;

/// COREX idle wait: 1 us delay, 10 000 polls (~10 ms worst case).
pub const COREX_IDLE: PollBudget = PollBudget {
    delay: Duration::from_micros(1),
    max_iterations: 10_000,
};

/// General core idle wait: 3 us delay, 10 000 polls (~30 ms worst case).
pub const CORE_IDLE: PollBudget = PollBudget {
    delay: Duration::from_micros(3),
    max_iterations: 10_000,
};

/// Interrupt-clear wait: 1 ms delay, 1 000 polls (~1 s worst case) per
/// status register.
pub const ISR_CLEAR: PollBudget = PollBudget {
    delay: Duration::from_millis(1),
    max_iterations: 1_000,
};

/// Delay granularity and retry cap for one wait site.
#[derive(Debug, Clone, Copy)]
pub struct PollBudget {
    /// Sleep between polls.
    pub delay: Duration,
    /// Number of polls before giving up.
    pub max_iterations: u32,
}

/// Poll `ready` until it returns true or the budget is exhausted.
///
/// # Errors
///
/// Returns [`CstatError::Timeout`] carrying `what` and the poll count when
/// the budget runs out.
pub fn poll_until(
    what: &'static str,
    budget: PollBudget,
    mut ready: impl FnMut() -> bool,
) -> Result<()> {
    for _ in 0..budget.max_iterations {
        if ready() {
            return Ok(());
        }
        std::thread::sleep(budget.delay);
    }
    Err(CstatError::timeout(what, budget.max_iterations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_immediately_when_ready() {
        let mut calls = 0;
        let r = poll_until("ready", COREX_IDLE, || {
            calls += 1;
            true
        });
        assert!(r.is_ok());
        assert_eq!(calls, 1);
    }

    #[test]
    fn exhausts_exactly_the_budget() {
        let budget = PollBudget {
            delay: Duration::from_nanos(1),
            max_iterations: 37,
        };
        let mut calls = 0;
        let r = poll_until("never", budget, || {
            calls += 1;
            false
        });
        assert_eq!(calls, 37);
        match r {
            Err(CstatError::Timeout { what, iterations }) => {
                assert_eq!(what, "never");
                assert_eq!(iterations, 37);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn succeeds_on_the_last_permitted_poll() {
        let budget = PollBudget {
            delay: Duration::from_nanos(1),
            max_iterations: 3,
        };
        let mut calls = 0;
        let r = poll_until("late", budget, || {
            calls += 1;
            calls == 3
        });
        assert!(r.is_ok());
        assert_eq!(calls, 3);
    }
}
