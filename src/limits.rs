/*!
 * Limits and Constants
 *
 * Centralized location for crate-wide constants and sentinels.
 */

/// Link handle value meaning "not enqueued"
/// A fresh `WaitQueueEntry` carries this, so removing a never-inserted
/// entry from a list is a safe no-op
pub const LINK_DETACHED: u32 = u32::MAX;

/// Initial wait-list arena capacity, counting the sentinel slot
/// [PERF] Covers typical worker-pool sizes without reallocating
pub const WAITLIST_INITIAL_SLOTS: usize = 16;

/// Milliseconds in one second
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Nanoseconds in one millisecond
/// Used to normalize a millisecond count into (seconds, subsecond-nanos)
/// with the nanosecond part always below one second
pub const NANOS_PER_MILLI: u64 = 1_000_000;
