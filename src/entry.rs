/*!
 * Wait Entry
 *
 * One mutex paired with one condition variable: the atomic unit of
 * "something can block here and be woken."
 *
 * # Design
 *
 * The condvar is only reachable through methods that take the mutex guard,
 * so the monitor invariant (never wait without the paired lock held) is
 * enforced by the API shape rather than by convention. Construction is
 * `const` and cannot fail; `parking_lot` primitives allocate no OS
 * handles, so there is no initialization failure to surface or recover
 * from. Destruction is `Drop`, automatic and exactly-once.
 */

use crate::errors::{WaitError, WaitResult};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A mutex/condvar pair, the unit of blocking and waking
///
/// # Examples
///
/// ```
/// use waitq::WaitEntry;
/// use std::time::Duration;
///
/// let entry = WaitEntry::new();
/// let mut guard = entry.lock();
/// // No signaler exists, so this times out
/// let woke = entry.wait_for(&mut guard, Duration::from_millis(10));
/// assert!(!woke);
/// ```
pub struct WaitEntry {
    mutex: Mutex<()>,
    condvar: Condvar,
}

impl WaitEntry {
    /// Create a live entry with default (process-private) attributes
    ///
    /// `const`, so entries can be stack-scoped or `static` without any
    /// shared initialization routine.
    pub const fn new() -> Self {
        Self {
            mutex: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    /// Acquire the entry's mutex
    ///
    /// The returned guard is the caller's ticket into every wait method;
    /// dropping it releases the lock on every exit path.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutex.lock()
    }

    /// Block until notified
    ///
    /// Atomically releases the mutex while blocked and reacquires it before
    /// returning. Spurious wakeups are possible; callers re-check their
    /// predicate.
    pub fn wait(&self, guard: &mut MutexGuard<'_, ()>) {
        self.condvar.wait(guard);
    }

    /// Block until notified or the absolute deadline elapses
    ///
    /// Returns `true` if the wait ended for any reason other than the
    /// deadline (a notify or a spurious wakeup), `false` on timeout.
    pub fn wait_until(&self, guard: &mut MutexGuard<'_, ()>, deadline: Instant) -> bool {
        !self.condvar.wait_until(guard, deadline).timed_out()
    }

    /// Block until notified or the relative timeout elapses
    pub fn wait_for(&self, guard: &mut MutexGuard<'_, ()>, timeout: Duration) -> bool {
        !self.condvar.wait_for(guard, timeout).timed_out()
    }

    /// Bounded wait surfacing the timeout as a typed error
    ///
    /// Convenience for callers threading `?`; semantically identical to
    /// [`wait_until`](Self::wait_until).
    pub fn wait_deadline(
        &self,
        guard: &mut MutexGuard<'_, ()>,
        deadline: Instant,
    ) -> WaitResult<()> {
        if self.wait_until(guard, deadline) {
            Ok(())
        } else {
            Err(WaitError::Timeout)
        }
    }

    /// Wake one blocked thread, if any
    ///
    /// Returns whether a thread was woken.
    pub fn notify_one(&self) -> bool {
        self.condvar.notify_one()
    }

    /// Wake all blocked threads
    ///
    /// Returns the number of threads woken.
    pub fn notify_all(&self) -> usize {
        self.condvar.notify_all()
    }
}

impl Default for WaitEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WaitEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitEntry")
            .field("locked", &self.mutex.is_locked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_notify_wakes_waiter() {
        let entry = Arc::new(WaitEntry::new());
        let entry_clone = entry.clone();

        let handle = thread::spawn(move || {
            let mut guard = entry_clone.lock();
            entry_clone.wait_for(&mut guard, Duration::from_secs(1))
        });

        // Give thread time to wait
        thread::sleep(Duration::from_millis(50));

        entry.notify_one();
        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_timeout_returns_false() {
        let entry = WaitEntry::new();
        let start = Instant::now();

        let mut guard = entry.lock();
        let woke = entry.wait_for(&mut guard, Duration::from_millis(50));
        drop(guard);

        assert!(!woke);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_wait_deadline_error() {
        let entry = WaitEntry::new();
        let mut guard = entry.lock();
        let result = entry.wait_deadline(&mut guard, Instant::now() + Duration::from_millis(10));
        assert_eq!(result, Err(WaitError::Timeout));
    }

    #[test]
    fn test_construct_and_drop_clean() {
        // No wait or signal ever issued; drop must release cleanly
        let entry = WaitEntry::new();
        drop(entry);
    }

    #[test]
    fn test_notify_without_waiters() {
        let entry = WaitEntry::new();
        assert!(!entry.notify_one());
        assert_eq!(entry.notify_all(), 0);
    }
}
