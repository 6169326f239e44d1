//! Node identifiers and the sequential generator that hands them out.
//!
//! A node ID is an index into the flat per-entity
//! [`NodeStates`](crate::context::NodeStates) vector. IDs must be unique
//! within a tree and dense enough that the vector stays small, so trees are
//! built by drawing every ID from one [`NodeIdGenerator`] rather than by
//! writing numbers by hand.

use core::fmt;

/// Index of a node's resumption slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw slot index.
    ///
    /// Prefer [`NodeIdGenerator::next_id`]; this exists for tests that need
    /// to construct malformed trees on purpose.
    pub const fn from_raw(index: usize) -> Self {
        Self(index)
    }

    /// The slot index this ID addresses.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out sequential node IDs starting at 0.
///
/// Build one generator per tree and draw every node's ID from it while the
/// tree is being constructed.
#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next: usize,
}

impl NodeIdGenerator {
    /// A generator whose first ID is 0.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Return the next unused ID.
    pub const fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// How many IDs have been handed out so far.
    pub const fn issued(&self) -> usize {
        self.next
    }
}
