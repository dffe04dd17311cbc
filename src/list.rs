/*!
 * Wait List
 *
 * Doubly-linked queue of wait-queue entries with O(1) insert and remove.
 *
 * # Design: Arena Handles Over Intrusive Pointers
 *
 * The classical version of this structure embeds prev/next pointers
 * directly in the entry. Here the links live in a slot arena owned by the
 * list, and the entry embeds only a slot handle (`ListLink`). Slot 0 is a
 * sentinel anchor that is self-linked when the list is empty, so splicing
 * never branches on emptiness. Freed slots are recycled through a free
 * list; the arena grows but never shrinks.
 *
 * The list is not thread-safe. The queue head of a waiting protocol lives
 * under a caller-owned lock, and all insert/remove calls happen under it.
 * The handle itself is atomic (Relaxed) only so `WaitQueueEntry` stays
 * `Sync` while waiter threads hold references to it.
 */

use crate::limits::{LINK_DETACHED, WAITLIST_INITIAL_SLOTS};
use crate::queue::WaitQueueEntry;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Slot handle embedded in a `WaitQueueEntry`
///
/// Carries [`LINK_DETACHED`] while the entry is not enqueued, which makes
/// removing a never-inserted entry a safe no-op.
pub struct ListLink(AtomicU32);

impl ListLink {
    pub(crate) const fn detached() -> Self {
        Self(AtomicU32::new(LINK_DETACHED))
    }

    /// Whether the owning entry is currently outside any list
    pub fn is_detached(&self) -> bool {
        self.get() == LINK_DETACHED
    }

    fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, slot: u32) {
        self.0.store(slot, Ordering::Relaxed);
    }
}

/// One arena slot: link cell plus the enqueued entry
struct Slot {
    prev: u32,
    next: u32,
    entry: Option<Arc<WaitQueueEntry>>,
}

/// Caller-owned queue of wait-queue entries
///
/// # Examples
///
/// ```
/// use waitq::{WaitList, WaitQueueEntry};
/// use std::sync::Arc;
///
/// let mut list = WaitList::new();
/// let entry = Arc::new(WaitQueueEntry::new());
///
/// // Removing a never-inserted entry is a no-op
/// assert!(!list.remove(&entry));
///
/// list.push_back(&entry);
/// assert_eq!(list.len(), 1);
/// assert!(list.remove(&entry));
/// assert!(list.is_empty());
/// ```
pub struct WaitList {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl WaitList {
    /// Create an empty list with the default arena preallocation
    pub fn new() -> Self {
        Self::with_capacity(WAITLIST_INITIAL_SLOTS)
    }

    /// Create an empty list sized for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        // Sentinel anchor, self-linked while empty
        slots.push(Slot {
            prev: 0,
            next: 0,
            entry: None,
        });
        Self {
            slots,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of enqueued entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Enqueue at the tail
    ///
    /// Returns `false` without touching the list if the entry is already
    /// linked (an entry lives in at most one list at a time).
    pub fn push_back(&mut self, entry: &Arc<WaitQueueEntry>) -> bool {
        let anchor_prev = self.slots[0].prev;
        self.insert_between(entry, anchor_prev, 0)
    }

    /// Enqueue at the head
    pub fn push_front(&mut self, entry: &Arc<WaitQueueEntry>) -> bool {
        let anchor_next = self.slots[0].next;
        self.insert_between(entry, 0, anchor_next)
    }

    /// Unlink an entry, O(1)
    ///
    /// A no-op returning `false` if the entry is detached or its handle
    /// does not resolve to it in this list (never inserted, already
    /// removed, or enqueued elsewhere).
    pub fn remove(&mut self, entry: &WaitQueueEntry) -> bool {
        let slot = entry.link().get();
        if !self.holds(slot, entry) {
            return false;
        }

        let (prev, next) = {
            let cell = &self.slots[slot as usize];
            (cell.prev, cell.next)
        };
        self.slots[prev as usize].next = next;
        self.slots[next as usize].prev = prev;
        self.slots[slot as usize].entry = None;
        self.free.push(slot);
        entry.link().set(LINK_DETACHED);
        self.len -= 1;

        trace!(slot, len = self.len, "wait entry unlinked");
        true
    }

    /// The entry at the head, if any
    pub fn front(&self) -> Option<&Arc<WaitQueueEntry>> {
        let head = self.slots[0].next;
        if head == 0 {
            return None;
        }
        self.slots[head as usize].entry.as_ref()
    }

    /// Dequeue the head entry
    pub fn pop_front(&mut self) -> Option<Arc<WaitQueueEntry>> {
        let entry = self.front()?.clone();
        self.remove(&entry);
        Some(entry)
    }

    /// Iterate head to tail
    pub fn iter(&self) -> WaitListIter<'_> {
        WaitListIter {
            list: self,
            cursor: self.slots[0].next,
        }
    }

    /// Whether `slot` is a live slot of this list holding exactly `entry`
    fn holds(&self, slot: u32, entry: &WaitQueueEntry) -> bool {
        if slot == LINK_DETACHED || slot as usize >= self.slots.len() {
            return false;
        }
        match &self.slots[slot as usize].entry {
            Some(held) => std::ptr::eq(Arc::as_ptr(held), entry),
            None => false,
        }
    }

    fn insert_between(&mut self, entry: &Arc<WaitQueueEntry>, prev: u32, next: u32) -> bool {
        if !entry.link().is_detached() {
            return false;
        }

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot {
                    prev: 0,
                    next: 0,
                    entry: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        {
            let cell = &mut self.slots[slot as usize];
            cell.prev = prev;
            cell.next = next;
            cell.entry = Some(entry.clone());
        }
        self.slots[prev as usize].next = slot;
        self.slots[next as usize].prev = slot;
        entry.link().set(slot);
        self.len += 1;

        trace!(slot, len = self.len, "wait entry enqueued");
        true
    }
}

impl Default for WaitList {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over enqueued entries
pub struct WaitListIter<'a> {
    list: &'a WaitList,
    cursor: u32,
}

impl<'a> Iterator for WaitListIter<'a> {
    type Item = &'a Arc<WaitQueueEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == 0 {
            return None;
        }
        let cell = &self.list.slots[self.cursor as usize];
        self.cursor = cell.next;
        cell.entry.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<Arc<WaitQueueEntry>> {
        (0..n).map(|_| Arc::new(WaitQueueEntry::new())).collect()
    }

    #[test]
    fn test_remove_never_inserted_is_noop() {
        let mut list = WaitList::new();
        let entry = Arc::new(WaitQueueEntry::new());

        assert!(!list.remove(&entry));
        assert!(list.is_empty());
        assert!(!entry.is_linked());
    }

    #[test]
    fn test_push_and_remove_maintain_len() {
        let mut list = WaitList::new();
        let entries = entries(3);

        for entry in &entries {
            assert!(list.push_back(entry));
        }
        assert_eq!(list.len(), 3);
        assert!(entries.iter().all(|e| e.is_linked()));

        // O(1) unlink from the middle
        assert!(list.remove(&entries[1]));
        assert_eq!(list.len(), 2);
        assert!(!entries[1].is_linked());

        let order: Vec<_> = list.iter().map(Arc::as_ptr).collect();
        assert_eq!(
            order,
            vec![Arc::as_ptr(&entries[0]), Arc::as_ptr(&entries[2])]
        );
    }

    #[test]
    fn test_double_insert_rejected() {
        let mut list = WaitList::new();
        let entry = Arc::new(WaitQueueEntry::new());

        assert!(list.push_back(&entry));
        assert!(!list.push_back(&entry));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_push_front_orders_before_back() {
        let mut list = WaitList::new();
        let entries = entries(2);

        list.push_back(&entries[0]);
        list.push_front(&entries[1]);

        assert_eq!(
            list.front().map(Arc::as_ptr),
            Some(Arc::as_ptr(&entries[1]))
        );
    }

    #[test]
    fn test_pop_front_drains_in_order() {
        let mut list = WaitList::new();
        let entries = entries(3);
        for entry in &entries {
            list.push_back(entry);
        }

        for expected in &entries {
            let popped = list.pop_front().unwrap();
            assert_eq!(Arc::as_ptr(&popped), Arc::as_ptr(expected));
            assert!(!popped.is_linked());
        }
        assert!(list.pop_front().is_none());
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = WaitList::new();
        let entries = entries(2);

        list.push_back(&entries[0]);
        let first_slot = entries[0].link().get();
        list.remove(&entries[0]);

        // Freed slot comes back for the next insert
        list.push_back(&entries[1]);
        assert_eq!(entries[1].link().get(), first_slot);
    }

    #[test]
    fn test_remove_through_wrong_list_is_noop() {
        let mut a = WaitList::new();
        let mut b = WaitList::new();
        let entries = entries(2);

        a.push_back(&entries[0]);
        // Occupies slot 1 of `b` so the stale handle resolves to a
        // different entry there
        b.push_back(&entries[1]);

        assert!(!b.remove(&entries[0]));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert!(entries[0].is_linked());
    }
}
