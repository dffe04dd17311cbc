/*!
 * Wait Queue Primitives
 *
 * Minimal thread-parking building blocks: a mutex/condvar *wait entry*,
 * a *wait queue entry* combining two wait entries with a waiter count,
 * a flags handshake and list linkage, and a one-shot timed-sleep helper.
 *
 * # Architecture
 *
 * This crate supplies only the primitives and their initialization. The
 * waiting protocol itself (predicate, signal source, queue insertion and
 * removal order) is dictated by the caller, following standard monitor
 * discipline: acquire the entry's mutex, check a caller-defined predicate,
 * wait or signal, release.
 *
 * # Use Cases
 *
 * - **Worker parking**: block a thread until a lock release or I/O
 *   completion is signaled
 * - **Producer/consumer handshakes**: the two-phase `WAIT_SYNC`/`SYNC_DONE`
 *   flags protocol on a queue entry
 * - **Timed sleeps**: `delay_ms` without any shared state
 */

mod delay;
mod entry;
mod errors;
mod flags;
mod list;
mod queue;

pub mod limits;

pub use delay::delay_ms;
pub use entry::WaitEntry;
pub use errors::{WaitError, WaitResult};
pub use flags::WqeFlags;
pub use list::{ListLink, WaitList, WaitListIter};
pub use queue::{Side, WaitQueueEntry};
