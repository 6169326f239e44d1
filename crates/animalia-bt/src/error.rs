//! Errors raised while assembling a tree.

use crate::id::NodeId;

/// Errors from [`BehaviorTree::new`](crate::tree::BehaviorTree::new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Two nodes in the same tree share an ID and would share a
    /// resumption slot.
    #[error("node id {id} is used by both `{first}` and `{second}`")]
    DuplicateNodeId {
        /// The colliding ID.
        id: NodeId,
        /// Name of the node that claimed the ID first.
        first: &'static str,
        /// Name of the node that claimed it again.
        second: &'static str,
    },
}
