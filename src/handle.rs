//! Object handles - stable opaque identifiers for interactive objects
//!
//! Every control, gesture and command item is issued an [`ObjectId`] when it
//! is created. The router keys its bindings on these ids instead of on live
//! object references.

use std::cell::Cell;
use std::fmt;

/// Opaque identity of an interactive object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Raw numeric value (for logging)
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena-style id issuer. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct HandleAllocator {
    next: Cell<u64>,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Issue a fresh id
    pub fn allocate(&self) -> ObjectId {
        let id = self.next.get();
        self.next.set(id + 1);
        ObjectId(id)
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.next.get() - 1
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}
