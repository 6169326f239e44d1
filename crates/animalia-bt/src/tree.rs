//! A validated root node plus the slot count entities need.

use std::collections::HashMap;

use crate::context::{NodeStates, TickContext};
use crate::error::TreeError;
use crate::id::NodeId;
use crate::node::Node;
use crate::status::Status;

/// A behavior tree whose node IDs are known to be unique.
#[derive(Debug)]
pub struct BehaviorTree<B, W> {
    root: Node<B, W>,
    slot_count: usize,
}

impl<B, W> BehaviorTree<B, W> {
    /// Validate `root` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateNodeId`] if two nodes share an ID.
    pub fn new(root: Node<B, W>) -> Result<Self, TreeError> {
        let mut seen: HashMap<NodeId, &'static str> = HashMap::new();
        let mut duplicate = None;
        let mut max_index = 0usize;

        root.walk(&mut |node| {
            max_index = max_index.max(node.id().index());
            if duplicate.is_some() {
                return;
            }
            if let Some(first) = seen.insert(node.id(), node.name()) {
                duplicate = Some(TreeError::DuplicateNodeId {
                    id: node.id(),
                    first,
                    second: node.name(),
                });
            }
        });

        if let Some(err) = duplicate {
            return Err(err);
        }

        Ok(Self {
            root,
            slot_count: max_index.saturating_add(1),
        })
    }

    /// The root node.
    pub const fn root(&self) -> &Node<B, W> {
        &self.root
    }

    /// Number of resumption slots an entity needs to run this tree.
    pub const fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// A fresh resumption vector sized for this tree.
    pub fn new_states(&self) -> NodeStates {
        NodeStates::with_len(self.slot_count)
    }

    /// Every node ID in the tree, parent before children.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        self.root.walk(&mut |node| ids.push(node.id()));
        ids
    }

    /// Tick the root once on behalf of one entity.
    pub fn tick(&self, blackboard: &mut B, world: &mut W, states: &mut NodeStates) -> Status {
        states.ensure_len(self.slot_count);
        let mut ctx = TickContext::new(blackboard, world, states);
        self.root.tick(&mut ctx)
    }
}
