//! Per-tick evaluation context and the resumption-state vector.

use crate::id::NodeId;

/// Flat per-entity resumption state, one slot per node ID.
///
/// Composite nodes store the index of the child to resume from; leaves
/// leave their slot untouched. The vector lives with the entity, not with
/// the tree, so one tree definition can drive any number of entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStates {
    slots: Vec<usize>,
}

impl NodeStates {
    /// A state vector with `len` slots, all at 0.
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![0; len],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Grow to at least `len` slots. Existing slots keep their values.
    pub fn ensure_len(&mut self, len: usize) {
        if self.slots.len() < len {
            self.slots.resize(len, 0);
        }
    }

    /// Saved resume index for `id` (0 when never set).
    pub fn get(&self, id: NodeId) -> usize {
        debug_assert!(
            id.index() < self.slots.len(),
            "node {id} has no resumption slot (len {})",
            self.slots.len()
        );
        self.slots.get(id.index()).copied().unwrap_or(0)
    }

    /// Store the resume index for `id`.
    pub fn set(&mut self, id: NodeId, index: usize) {
        debug_assert!(
            id.index() < self.slots.len(),
            "node {id} has no resumption slot (len {})",
            self.slots.len()
        );
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = index;
        }
    }

    /// Reset every slot to 0, restarting the whole tree from its root.
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    /// Raw view of the slots, for diagnostics.
    pub fn as_slice(&self) -> &[usize] {
        &self.slots
    }
}

/// Everything a node can see while it is being ticked.
///
/// `B` is the blackboard (the agent being driven) and `W` the world it
/// lives in. Both are borrowed mutably for the duration of one tree tick;
/// condition predicates only ever receive a shared reference to the
/// context, so they cannot mutate either.
#[derive(Debug)]
pub struct TickContext<'a, B, W> {
    /// The agent-specific data leaves read and write.
    pub blackboard: &'a mut B,
    /// The world the agent lives in.
    pub world: &'a mut W,
    states: &'a mut NodeStates,
}

impl<'a, B, W> TickContext<'a, B, W> {
    /// Bundle a blackboard, a world, and a resumption vector.
    pub const fn new(blackboard: &'a mut B, world: &'a mut W, states: &'a mut NodeStates) -> Self {
        Self {
            blackboard,
            world,
            states,
        }
    }

    /// Child index composite `id` should resume from.
    pub fn resume_index(&self, id: NodeId) -> usize {
        self.states.get(id)
    }

    /// Record the child index composite `id` should resume from.
    pub fn set_resume_index(&mut self, id: NodeId, index: usize) {
        self.states.set(id, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_default_to_zero_and_remember_values() {
        let mut states = NodeStates::with_len(3);
        let id = NodeId::from_raw(2);
        assert_eq!(states.get(id), 0);
        states.set(id, 5);
        assert_eq!(states.get(id), 5);
        assert_eq!(states.as_slice(), &[0, 0, 5]);
        states.reset();
        assert_eq!(states.get(id), 0);
    }

    #[test]
    fn ensure_len_only_grows() {
        let mut states = NodeStates::with_len(2);
        states.set(NodeId::from_raw(1), 4);
        states.ensure_len(4);
        assert_eq!(states.as_slice(), &[0, 4, 0, 0]);
        states.ensure_len(1);
        assert_eq!(states.len(), 4);
    }
}
