//! Exponential backoff.

use std::time::Duration;

/// Delay before retry `attempt`, counted from 1: `unit * 2^attempt`.
///
/// Attempt 0 is the initial call and never waits. The schedule carries no
/// jitter, so attempt 1 waits two units, attempt 2 four units, and so on.
pub fn calculate_backoff(attempt: u32, unit: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let factor = 2u32.saturating_pow(attempt);
    unit.saturating_mul(factor)
}

/// Sum of every delay a retry budget of `max_retries` can incur.
pub fn worst_case_delay(max_retries: u32, unit: Duration) -> Duration {
    (1..=max_retries).fold(Duration::ZERO, |total, attempt| {
        total.saturating_add(calculate_backoff(attempt, unit))
    })
}
