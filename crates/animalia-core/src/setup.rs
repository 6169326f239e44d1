//! Build a ready-to-run [`Simulation`] from a [`SimulationConfig`].

use std::sync::Arc;

use animalia_agents::{AgentError, goat_tree, spawn_population};
use animalia_types::WorldId;
use animalia_world::{World, WorldError};
use tracing::info;

use crate::config::SimulationConfig;
use crate::tick::Simulation;

/// Errors that can occur while assembling a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// World generation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Tree construction or spawning failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Generate the world, build the shared goat tree, and spawn the
/// initial population.
///
/// The same config (seed included) always yields the same simulation.
///
/// # Errors
///
/// Returns [`SetupError`] if the terrain does not fit, the tree is
/// malformed, or no goat can be placed.
pub fn build_simulation(config: &SimulationConfig) -> Result<Simulation, SetupError> {
    let mut world = World::generate(
        WorldId::new(1),
        config.world.width,
        config.world.height,
        config.world.seed,
        &config.terrain,
    )?;

    let tree = Arc::new(goat_tree(config.behavior).map_err(AgentError::from)?);
    let entities = spawn_population(&mut world, &config.population, &tree)?;

    info!(
        name = %config.world.name,
        seed = config.world.seed,
        goats = entities.len(),
        tree_nodes = tree.slot_count(),
        "simulation assembled"
    );

    Ok(Simulation::new(
        world,
        entities,
        config.decay,
        config.world.tps(),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use animalia_types::ObstacleType;

    use super::*;

    #[test]
    fn defaults_build_a_populated_world() {
        let sim = build_simulation(&SimulationConfig::default()).unwrap();
        assert_eq!(sim.entities().len(), 5);
        assert_eq!(sim.world().width(), 100);
        assert_eq!(sim.tps(), 10);
        assert_eq!(sim.world().obstacles().of_type(ObstacleType::Wall).len(), 60);
        assert_eq!(sim.current_tick(), 0);
    }

    #[test]
    fn overfull_terrain_is_a_world_error() {
        let mut config = SimulationConfig::default();
        config.world.width = 3;
        config.world.height = 3;
        let err = build_simulation(&config).unwrap_err();
        assert!(matches!(err, SetupError::World { .. }));
    }
}
