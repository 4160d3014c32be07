//! Removal handles for multicast entries.
//!
//! Every entry added to a multicast delegate is tagged with a [`DelegateKey`]
//! drawn from that delegate's [`KeyAllocator`]. Keys are strictly increasing
//! and never reused, even after removal or clear, so a stale key can never
//! match a newer entry.

use std::cell::Cell;
use std::fmt;

/// Opaque handle identifying one entry within one multicast delegate.
///
/// Ordering follows allocation order and nothing else. Keys issued by two
/// different delegates are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DelegateKey(u64);

impl fmt::Display for DelegateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic key source scoped to a single registry.
///
/// Uses a [`Cell`] so keys can be allocated through a shared reference,
/// including from inside a callback running on the same registry.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    next: Cell<u64>,
}

impl KeyAllocator {
    /// Create an allocator whose first key is `#0`.
    pub fn new() -> Self {
        Self { next: Cell::new(0) }
    }

    /// Allocate the next key.
    pub fn allocate(&self) -> DelegateKey {
        let key = self.next.get();
        self.next.set(key + 1);
        DelegateKey(key)
    }

    /// Number of keys issued so far.
    pub fn issued(&self) -> u64 {
        self.next.get()
    }
}
