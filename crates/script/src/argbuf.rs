//! Reusable argument slot buffer.
//!
//! One vector of [`StoreArg`] slots serves every nested call a host makes,
//! so steady-state dispatch allocates nothing for argument plumbing. The
//! vector is sized to the high-water argument count and never shrinks.

use maris_core::StoreArg;

/// Growable argument slot storage reused across nested calls.
///
/// The slots move onto the script client for the duration of one dispatch
/// ([`take_slots`](Self::take_slots)) and come back through
/// [`reclaim`](Self::reclaim), which keeps whichever allocation is larger.
/// That keeps the never-shrinks invariant on paths where the slots were
/// never installed (conversion failure leaves them here).
#[derive(Debug, Default)]
pub struct ArgBuffer {
    slots: Vec<StoreArg>,
}

impl ArgBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cleared slot vector, grown to hold at least `count` arguments.
    pub fn acquire(&mut self, count: usize) -> &mut Vec<StoreArg> {
        self.slots.clear();
        self.slots.reserve(count);
        &mut self.slots
    }

    /// Move the filled slots out for installation on the client.
    pub fn take_slots(&mut self) -> Vec<StoreArg> {
        std::mem::take(&mut self.slots)
    }

    /// Take argument storage back after a call.
    pub fn reclaim(&mut self, mut returned: Vec<StoreArg>) {
        returned.clear();
        if returned.capacity() > self.slots.capacity() {
            self.slots = returned;
        }
    }

    /// Current slot capacity (the high-water argument count).
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}
