//! The goat blackboard: everything the goat tree reads and writes.

use animalia_types::{
    EntityId, EntitySnapshot, EntityState, EntityType, Stats, Vector2D, Vital,
};
use tracing::debug;

use crate::config::WalkCost;

/// Per-goat mutable state, passed to the tree as its blackboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Goat {
    /// Identifier, unique within a simulation.
    pub id: EntityId,
    /// Archetype label.
    pub kind: EntityType,
    /// Current position in world units.
    pub position: Vector2D,
    /// Unit direction of the last movement step.
    pub direction: Vector2D,
    /// Where the goat is heading, if anywhere.
    pub target_pos: Option<Vector2D>,
    /// High-level state label.
    pub state: EntityState,
    /// Vital stats.
    pub stats: Stats,
    /// Tick at which `state` last changed.
    pub last_state_change_at: u64,
}

impl Goat {
    /// A roaming goat at `position` with fresh stats.
    pub const fn new(id: EntityId, position: Vector2D, stats: Stats) -> Self {
        Self {
            id,
            kind: EntityType::Goat,
            position,
            direction: Vector2D::ZERO,
            target_pos: None,
            state: EntityState::Roaming,
            stats,
            last_state_change_at: 0,
        }
    }

    /// Change the state label, stamping the tick if it actually changed.
    ///
    /// Returns whether the label changed.
    pub fn set_state(&mut self, state: EntityState, tick: u64) -> bool {
        if self.state == state {
            return false;
        }
        debug!(
            entity = %self.id,
            from = %self.state,
            to = %state,
            tick,
            "state changed"
        );
        self.state = state;
        self.last_state_change_at = tick;
        true
    }

    /// Distance to the target, if one is set.
    pub fn distance_to_target(&self) -> Option<f64> {
        self.target_pos.map(|target| self.position.distance(target))
    }

    /// Whether the goat is within `radius` of its target.
    ///
    /// A goat with no target has nowhere to walk and counts as arrived.
    pub fn has_arrived(&self, radius: f64) -> bool {
        self.distance_to_target().is_none_or(|distance| distance <= radius)
    }

    /// Move one step toward the target.
    ///
    /// Within `radius` the goat snaps onto the target. Otherwise it advances
    /// `speed` units along the straight line, never past the target.
    /// Returns whether the goat is within `radius` after the step. Does
    /// nothing and returns `true` when there is no target.
    pub fn step_toward_target(&mut self, speed: f64, radius: f64) -> bool {
        let Some(target) = self.target_pos else {
            return true;
        };
        let offset = target - self.position;
        let distance = offset.length();
        if distance <= radius {
            self.position = target;
            return true;
        }
        self.direction = offset.normalized();
        self.position = self.position + self.direction.scale(speed.min(distance));
        self.position.distance(target) <= radius
    }

    /// Charge the stat cost of one moving tick.
    pub fn pay_walk_cost(&mut self, cost: WalkCost) {
        for vital in Vital::ALL {
            self.stats.adjust(vital, i32::from(cost.get(vital)));
        }
    }

    /// Read-only projection for renderers and clients.
    pub const fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            state: self.state,
            direction: self.direction,
            target_pos: self.target_pos,
            stats: self.stats,
            last_state_change_at: self.last_state_change_at,
        }
    }
}
