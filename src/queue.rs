/*!
 * Wait Queue Entry
 *
 * A node pairing two wait entries (two distinct wait roles on the same
 * queue position), a waiter count, a flags bitmask, and linkage into a
 * caller-owned wait list.
 *
 * # Shared-state discipline
 *
 * `waiters` and `flags` are shared mutable state. They are stored in
 * atomics so the type stays `Sync`, but the crate provides no protection
 * beyond that: the contract is that a thread only touches them while
 * holding the relevant side's mutex (increment before waiting, decrement
 * after waking, both under the lock). Violating that discipline is a race
 * between increment-before-wait and decrement-after-wake, not a checked
 * error.
 */

use crate::entry::WaitEntry;
use crate::flags::WqeFlags;
use crate::list::ListLink;
use std::sync::atomic::{AtomicU32, Ordering};

/// Selects one of the two wait roles on a queue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A wait-queue node: flags, waiter count, two wait entries, list linkage
///
/// # Examples
///
/// ```
/// use waitq::{Side, WaitQueueEntry, WqeFlags};
///
/// let entry = WaitQueueEntry::new();
/// assert_eq!(entry.waiters(), 0);
/// assert_eq!(entry.flags(), WqeFlags::NONE);
///
/// let left = entry.wait_entry(Side::Left);
/// let _guard = left.lock();
/// // predicate check, wait or notify, guard drop releases
/// ```
pub struct WaitQueueEntry {
    flags: AtomicU32,
    waiters: AtomicU32,
    left: WaitEntry,
    right: WaitEntry,
    link: ListLink,
}

impl WaitQueueEntry {
    /// Create a node with detached linkage, live wait entries, zero
    /// waiters, and no flags
    ///
    /// Every field starts in a defined state; callers never need a
    /// separate step to zero the counter or the flags word.
    pub const fn new() -> Self {
        Self {
            flags: AtomicU32::new(WqeFlags::NONE.bits()),
            waiters: AtomicU32::new(0),
            left: WaitEntry::new(),
            right: WaitEntry::new(),
            link: ListLink::detached(),
        }
    }

    /// The left wait entry
    pub fn left(&self) -> &WaitEntry {
        &self.left
    }

    /// The right wait entry
    pub fn right(&self) -> &WaitEntry {
        &self.right
    }

    /// Select a wait entry by role
    pub fn wait_entry(&self, side: Side) -> &WaitEntry {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Number of threads currently blocked on either wait entry
    ///
    /// Meaningful only under the same mutex discipline the mutators
    /// require; a raw load elsewhere is a point-in-time approximation.
    pub fn waiters(&self) -> u32 {
        self.waiters.load(Ordering::Relaxed)
    }

    /// Record one more blocked thread; call with the side's mutex held,
    /// immediately before waiting. Returns the new count.
    pub fn add_waiter(&self) -> u32 {
        self.waiters.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record one fewer blocked thread; call with the side's mutex held,
    /// immediately after waking. Returns the new count.
    pub fn remove_waiter(&self) -> u32 {
        self.waiters.fetch_sub(1, Ordering::Relaxed) - 1
    }

    /// Current flags
    pub fn flags(&self) -> WqeFlags {
        WqeFlags::from_bits(self.flags.load(Ordering::Relaxed))
    }

    /// Replace the whole flags word
    pub fn set_flags(&self, flags: WqeFlags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }

    /// Set the given bits, leaving others untouched
    pub fn insert_flags(&self, flags: WqeFlags) {
        self.flags.fetch_or(flags.bits(), Ordering::Relaxed);
    }

    /// Clear the given bits, leaving others untouched
    pub fn clear_flags(&self, flags: WqeFlags) {
        self.flags.fetch_and(!flags.bits(), Ordering::Relaxed);
    }

    /// Whether this entry is currently enqueued in a wait list
    pub fn is_linked(&self) -> bool {
        !self.link.is_detached()
    }

    pub(crate) fn link(&self) -> &ListLink {
        &self.link
    }
}

impl Default for WaitQueueEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WaitQueueEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaitQueueEntry")
            .field("flags", &self.flags())
            .field("waiters", &self.waiters())
            .field("linked", &self.is_linked())
            .finish()
    }
}
