//! Tick cycle: the single-threaded loop that drives every goat.
//!
//! Each call to [`Simulation::tick`] runs three phases:
//!
//! 1. **Clock** -- advance the world clock (checked).
//! 2. **Think** -- tick every entity's tree once, in insertion order.
//!    Entities do not see each other and never collide.
//! 3. **Decay** -- add the configured passive rates to every entity's
//!    stats, clamped to `[0, 100]`.
//!
//! A tick is atomic with respect to callers: renderers, the keyboard
//! handler, and the observer only see the simulation between ticks.

use std::collections::BTreeMap;

use animalia_agents::Entity;
use animalia_types::{EntityId, EntitySnapshot, EntityState, Vital, WorldConfigSnapshot, WorldSnapshot};
use animalia_world::{World, WorldError};
use serde::Serialize;
use tracing::debug;

use crate::config::DecayConfig;

/// Errors that can occur during tick execution or between-tick control.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// No entity carries the requested ID.
    #[error("unknown entity {id}")]
    UnknownEntity {
        /// The requested ID.
        id: EntityId,
    },
}

/// One entity's state label change during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    /// The entity whose label changed.
    pub entity: EntityId,
    /// Label before the tick.
    pub from: EntityState,
    /// Label after the tick.
    pub to: EntityState,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Number of entities ticked.
    pub entity_count: usize,
    /// How many entities carry each state label at end of tick.
    pub state_counts: BTreeMap<EntityState, usize>,
    /// Label changes made this tick, in entity order.
    pub transitions: Vec<StateTransition>,
}

impl TickSummary {
    /// Entities carrying `state` at end of tick.
    pub fn count(&self, state: EntityState) -> usize {
        self.state_counts.get(&state).copied().unwrap_or(0)
    }
}

/// The world plus every entity living in it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    entities: Vec<Entity>,
    decay: DecayConfig,
    tps: u32,
}

impl Simulation {
    /// Assemble a simulation from an already-populated world.
    pub const fn new(world: World, entities: Vec<Entity>, decay: DecayConfig, tps: u32) -> Self {
        Self {
            world,
            entities,
            decay,
            tps,
        }
    }

    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::World`] if the tick counter would overflow.
    /// Nothing is mutated in that case.
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        let tick = self.world.advance_clock()?;

        let mut transitions = Vec::new();
        for entity in &mut self.entities {
            let before = entity.state();
            let status = entity.tick(&mut self.world);
            let after = entity.state();
            if before != after {
                transitions.push(StateTransition {
                    entity: entity.id(),
                    from: before,
                    to: after,
                });
            }
            debug!(tick, entity = %entity.id(), %status, state = %after, "entity ticked");
        }

        if !self.decay.is_none() {
            for entity in &mut self.entities {
                let stats = &mut entity.goat_mut().stats;
                for vital in Vital::ALL {
                    stats.adjust(vital, i32::from(self.decay.get(vital)));
                }
            }
        }

        let summary = TickSummary {
            tick,
            entity_count: self.entities.len(),
            state_counts: self.state_counts(),
            transitions,
        };
        debug!(
            tick,
            entities = summary.entity_count,
            transitions = summary.transitions.len(),
            "tick complete"
        );
        Ok(summary)
    }

    /// Overwrite one entity's state label from outside the tree.
    ///
    /// Returns whether the label changed. The tree tolerates any label; the
    /// next destination pick relabels the entity.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::UnknownEntity`] if `id` is not present.
    pub fn force_state(&mut self, id: EntityId, state: EntityState) -> Result<bool, TickError> {
        let tick = self.world.tick();
        let entity = self.entity_mut(id)?;
        let changed = entity.force_state(state, tick);
        debug!(entity = %id, %state, changed, "state forced");
        Ok(changed)
    }

    /// Advance one entity's label to the next one in display order.
    ///
    /// Returns the new label.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::UnknownEntity`] if `id` is not present.
    pub fn cycle_state(&mut self, id: EntityId) -> Result<EntityState, TickError> {
        let next = self.entity(id)?.state().next();
        self.force_state(id, next)?;
        Ok(next)
    }

    /// Current tick number (0 before the first tick).
    pub const fn current_tick(&self) -> u64 {
        self.world.tick()
    }

    /// The world.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Every entity, in tick order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Look up one entity.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::UnknownEntity`] if `id` is not present.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, TickError> {
        self.entities
            .iter()
            .find(|e| e.id() == id)
            .ok_or(TickError::UnknownEntity { id })
    }

    fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, TickError> {
        self.entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(TickError::UnknownEntity { id })
    }

    /// Ticks per second the driver aims for.
    pub const fn tps(&self) -> u32 {
        self.tps
    }

    /// Entity counts per state label. Every label is present, possibly 0.
    pub fn state_counts(&self) -> BTreeMap<EntityState, usize> {
        let mut counts: BTreeMap<EntityState, usize> =
            EntityState::ALL.into_iter().map(|s| (s, 0)).collect();
        for entity in &self.entities {
            if let Some(count) = counts.get_mut(&entity.state()) {
                *count = count.saturating_add(1);
            }
        }
        counts
    }

    /// Read-only projection of every entity.
    pub fn entity_snapshots(&self) -> Vec<EntitySnapshot> {
        self.entities.iter().map(Entity::snapshot).collect()
    }

    /// Read-only projection of the whole world.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            id: self.world.id(),
            width: self.world.width(),
            height: self.world.height(),
            tick: self.world.tick(),
            navigation_grid: self.world.grid().to_rows(),
            static_obstacles: self.world.obstacles().clone(),
            entities: self.entity_snapshots(),
            config: WorldConfigSnapshot { tps: self.tps },
        }
    }
}
