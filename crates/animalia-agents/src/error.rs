//! Error types for the animalia-agents crate.

use animalia_bt::TreeError;
use animalia_types::EntityId;

/// Errors that can occur while building or spawning goats.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The world has no walkable cell to place a goat on.
    #[error("no walkable cell to spawn entity {entity}")]
    NoSpawnCell {
        /// The entity that could not be placed.
        entity: EntityId,
    },

    /// More goats were requested than entity IDs can address.
    #[error("cannot spawn {requested} entities: id space exhausted")]
    TooManyEntities {
        /// Number of goats requested.
        requested: usize,
    },

    /// The behavior config contains values the tree cannot run with.
    #[error("invalid behavior config: {reason}")]
    InvalidBehavior {
        /// What is wrong.
        reason: String,
    },

    /// The goat tree failed validation.
    #[error("tree error: {source}")]
    Tree {
        /// The underlying tree error.
        #[from]
        source: TreeError,
    },
}
