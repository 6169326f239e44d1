//! An entity: a goat blackboard paired with its tree and resumption state.

use std::sync::Arc;

use animalia_bt::{NodeStates, Status};
use animalia_types::{EntityId, EntitySnapshot, EntityState};
use animalia_world::World;

use crate::goat::Goat;
use crate::tree::GoatTree;

/// A simulated goat.
///
/// The tree definition is immutable and shared between all entities built
/// from the same config. Each entity owns its blackboard and its
/// resumption vector, so entities never observe each other's progress.
#[derive(Debug, Clone)]
pub struct Entity {
    goat: Goat,
    states: NodeStates,
    tree: Arc<GoatTree>,
}

impl Entity {
    /// Wrap a goat with a fresh resumption vector for `tree`.
    pub fn new(goat: Goat, tree: Arc<GoatTree>) -> Self {
        Self {
            goat,
            states: tree.new_states(),
            tree,
        }
    }

    /// Entity identifier.
    pub const fn id(&self) -> EntityId {
        self.goat.id
    }

    /// Current state label.
    pub const fn state(&self) -> EntityState {
        self.goat.state
    }

    /// The blackboard.
    pub const fn goat(&self) -> &Goat {
        &self.goat
    }

    /// Mutable blackboard, for world-level post-processing.
    pub const fn goat_mut(&mut self) -> &mut Goat {
        &mut self.goat
    }

    /// The resumption vector.
    pub const fn node_states(&self) -> &NodeStates {
        &self.states
    }

    /// Run the tree once against `world`.
    pub fn tick(&mut self, world: &mut World) -> Status {
        self.tree.tick(&mut self.goat, world, &mut self.states)
    }

    /// Overwrite the state label from outside the tree.
    ///
    /// The tree keeps its resumption state; the next destination pick
    /// relabels the goat as usual.
    pub fn force_state(&mut self, state: EntityState, tick: u64) -> bool {
        self.goat.set_state(state, tick)
    }

    /// Read-only projection.
    pub const fn snapshot(&self) -> EntitySnapshot {
        self.goat.snapshot()
    }
}
