/*!
 * Wait Errors
 *
 * Timeout is the only failure mode surfaced as a typed error, and only on
 * the `Result`-returning convenience waits. The bool-returning primitive
 * surface treats timeout as a normal value. Construction of the primitives
 * cannot fail, and misuse (touching shared counters without the paired
 * mutex held) is a race the caller must avoid, not a checked error.
 */

use thiserror::Error;

/// Result type for wait operations
pub type WaitResult<T> = Result<T, WaitError>;

/// Wait operation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    #[error("wait operation timed out")]
    Timeout,
}
