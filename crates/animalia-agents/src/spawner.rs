//! Goat spawner for seeding the simulation at world setup.
//!
//! Each goat lands on a random walkable cell with randomized low stats and
//! its own resumption vector for the shared goat tree. IDs are handed out
//! sequentially from 0 in spawn order, which is also tick order.

use std::sync::Arc;

use animalia_types::{EntityId, Stats};
use animalia_world::World;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entity::Entity;
use crate::error::AgentError;
use crate::goat::Goat;
use crate::tree::GoatTree;

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// Initial population, loaded from the `population` key of
/// `animalia-config.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of goats to spawn at simulation start.
    #[serde(default = "default_initial_goats")]
    pub initial_goats: usize,

    /// Upper bound (inclusive) of a new goat's hunger.
    #[serde(default = "default_max_hunger")]
    pub max_hunger: u8,

    /// Upper bound (inclusive) of a new goat's thirst.
    #[serde(default = "default_max_thirst")]
    pub max_thirst: u8,

    /// Upper bound (inclusive) of a new goat's tiredness.
    #[serde(default = "default_max_tiredness")]
    pub max_tiredness: u8,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_goats: default_initial_goats(),
            max_hunger: default_max_hunger(),
            max_thirst: default_max_thirst(),
            max_tiredness: default_max_tiredness(),
        }
    }
}

const fn default_initial_goats() -> usize {
    5
}

const fn default_max_hunger() -> u8 {
    30
}

const fn default_max_thirst() -> u8 {
    25
}

const fn default_max_tiredness() -> u8 {
    20
}

// -----------------------------------------------------------------------
// Spawning
// -----------------------------------------------------------------------

/// Spawn one goat on a random walkable cell.
///
/// # Errors
///
/// Returns [`AgentError::NoSpawnCell`] if no cell is walkable.
pub fn spawn_goat(
    world: &mut World,
    id: EntityId,
    config: &PopulationConfig,
    tree: &Arc<GoatTree>,
) -> Result<Entity, AgentError> {
    let position = world
        .random_walkable_position()
        .ok_or(AgentError::NoSpawnCell { entity: id })?;

    let rng = world.rng();
    let stats = Stats::new(
        rng.random_range(0..=config.max_hunger),
        rng.random_range(0..=config.max_thirst),
        rng.random_range(0..=config.max_tiredness),
    );

    Ok(Entity::new(Goat::new(id, position, stats), Arc::clone(tree)))
}

/// Spawn the initial population with IDs `0..initial_goats`.
///
/// # Errors
///
/// Returns [`AgentError::NoSpawnCell`] if the world has no walkable cell
/// and [`AgentError::TooManyEntities`] if the count exceeds the ID space.
pub fn spawn_population(
    world: &mut World,
    config: &PopulationConfig,
    tree: &Arc<GoatTree>,
) -> Result<Vec<Entity>, AgentError> {
    let count = config.initial_goats;
    let upper = u32::try_from(count)
        .ok()
        .ok_or(AgentError::TooManyEntities { requested: count })?;

    let entities = (0..upper)
        .map(|raw| spawn_goat(world, EntityId::new(raw), config, tree))
        .collect::<Result<Vec<_>, _>>()?;

    info!(count = entities.len(), "spawned initial goats");
    Ok(entities)
}
