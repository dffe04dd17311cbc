/*!
 * Timed Delay
 *
 * One-shot timed sleep built on a throwaway wait entry.
 */

use crate::entry::WaitEntry;
use crate::limits::{MILLIS_PER_SEC, NANOS_PER_MILLI};
use std::time::{Duration, Instant};
use tracing::trace;

/// Block the calling thread for at least `ms` milliseconds
///
/// Captures the current time, computes an absolute deadline, and performs
/// a single bounded wait against it on a private, stack-scoped
/// [`WaitEntry`]. Returns `true` if the wait ended for any reason other
/// than the deadline elapsing, `false` on timeout.
///
/// Because the entry never escapes this stack frame, no other thread can
/// signal it: a `true` return can only come from a spurious wakeup of the
/// underlying primitive, so in practice this is a pure timed sleep.
/// Callers that need a wakeable sleep share a [`WaitEntry`] of their own
/// instead.
///
/// `ms` values large enough to overflow the deadline computation are a
/// caller error; behavior is unspecified in that case.
///
/// # Examples
///
/// ```
/// use std::time::Instant;
///
/// let start = Instant::now();
/// waitq::delay_ms(10);
/// assert!(start.elapsed().as_millis() >= 10);
/// ```
pub fn delay_ms(ms: u64) -> bool {
    // Normalized (seconds, subsecond-nanos): the nanosecond part stays
    // below one second by construction
    let secs = ms / MILLIS_PER_SEC;
    let nanos = (ms % MILLIS_PER_SEC) * NANOS_PER_MILLI;
    let deadline = Instant::now() + Duration::new(secs, nanos as u32);

    let entry = WaitEntry::new();
    let mut guard = entry.lock();
    let woke = entry.wait_until(&mut guard, deadline);
    drop(guard);

    trace!(ms, woke, "delay elapsed");
    woke
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_zero_returns_promptly() {
        let start = Instant::now();
        let woke = delay_ms(0);
        assert!(!woke);
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_delay_blocks_at_least_requested() {
        let start = Instant::now();
        let woke = delay_ms(100);
        let elapsed = start.elapsed();

        // No external signal source exists, so only a spurious wake could
        // flip this
        assert!(!woke);
        assert!(elapsed >= Duration::from_millis(100));
        // Scheduler slack, generous for loaded CI machines
        assert!(elapsed < Duration::from_millis(500));
    }

    #[test]
    fn test_deadline_normalization_spans_seconds() {
        // 1500ms splits into (1s, 5e8ns); just verify the arithmetic
        let ms: u64 = 1_500;
        let secs = ms / MILLIS_PER_SEC;
        let nanos = (ms % MILLIS_PER_SEC) * NANOS_PER_MILLI;
        assert_eq!(secs, 1);
        assert_eq!(nanos, 500_000_000);
        assert!(nanos < 1_000_000_000);
    }
}
