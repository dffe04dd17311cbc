/*!
 * Queue Entry Flags
 *
 * Bitmask for the two-phase synchronization handshake on a wait queue
 * entry: one side requests synchronization with `WAIT_SYNC`, the other
 * marks it finished with `SYNC_DONE`. Which side sets or clears which bit
 * is caller policy; this module only defines the bits.
 */

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Flags bitmask carried by a `WaitQueueEntry`
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct WqeFlags(u32);

impl WqeFlags {
    /// No flags set
    pub const NONE: Self = Self(0x0000);
    /// Synchronization requested
    pub const WAIT_SYNC: Self = Self(0x0001);
    /// Synchronization completed
    pub const SYNC_DONE: Self = Self(0x0002);

    /// Raw bit pattern
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reinterpret a raw bit pattern; unknown bits are preserved
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for WqeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for WqeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for WqeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        let mut emit = |name: &str, f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                write!(f, " | ")?;
            }
            first = false;
            write!(f, "{name}")
        };
        if self.contains(Self::WAIT_SYNC) {
            emit("WAIT_SYNC", f)?;
        }
        if self.contains(Self::SYNC_DONE) {
            emit("SYNC_DONE", f)?;
        }
        let unknown = self.difference(Self::WAIT_SYNC).difference(Self::SYNC_DONE);
        if !unknown.is_empty() {
            emit(&format!("{:#06x}", unknown.bits()), f)?;
        }
        Ok(())
    }
}
