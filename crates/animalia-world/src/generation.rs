//! Seeded world generation.
//!
//! Every obstacle gets its own distinct cell, drawn without replacement from
//! the whole grid with the world's seeded RNG, so the same seed and terrain
//! counts always produce the same map. Walls are placed first and block
//! their cells; water, food, and rest areas stay walkable.

use animalia_types::{ObstacleType, StaticObstacle, WorldId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::WorldError;
use crate::world::{World, cell_position};

/// How many obstacles of each type to scatter at world creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Impassable wall cells.
    #[serde(default = "default_walls")]
    pub walls: usize,
    /// Drinking spots.
    #[serde(default = "default_water_sources")]
    pub water_sources: usize,
    /// Eating spots.
    #[serde(default = "default_food_sources")]
    pub food_sources: usize,
    /// Rest areas.
    #[serde(default = "default_rest_areas")]
    pub rest_areas: usize,
}

const fn default_walls() -> usize {
    60
}

const fn default_water_sources() -> usize {
    6
}

const fn default_food_sources() -> usize {
    8
}

const fn default_rest_areas() -> usize {
    4
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            walls: default_walls(),
            water_sources: default_water_sources(),
            food_sources: default_food_sources(),
            rest_areas: default_rest_areas(),
        }
    }
}

impl TerrainConfig {
    /// Requested count for one obstacle type.
    pub const fn count(&self, kind: ObstacleType) -> usize {
        match kind {
            ObstacleType::Wall => self.walls,
            ObstacleType::WaterSource => self.water_sources,
            ObstacleType::FoodSource => self.food_sources,
            ObstacleType::RestArea => self.rest_areas,
        }
    }

    /// Total obstacles requested, saturating.
    pub fn total(&self) -> usize {
        ObstacleType::ALL
            .iter()
            .fold(0usize, |acc, kind| acc.saturating_add(self.count(*kind)))
    }
}

impl World {
    /// Create a world and scatter the configured obstacles over it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] for a zero-sized grid and
    /// [`WorldError::TooManyObstacles`] when the grid has fewer cells than
    /// obstacles requested.
    pub fn generate(
        id: WorldId,
        width: u32,
        height: u32,
        seed: u64,
        terrain: &TerrainConfig,
    ) -> Result<Self, WorldError> {
        let mut world = Self::new(id, width, height, seed)?;

        let (row_len, available) = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(cols, rows)| Some((cols, rows.checked_mul(cols)?)))
            .ok_or(WorldError::InvalidDimensions { width, height })?;

        let requested = terrain.total();
        if requested > available {
            return Err(WorldError::TooManyObstacles {
                requested,
                available,
            });
        }

        let picks = rand::seq::index::sample(world.rng(), available, requested);
        let kinds = ObstacleType::ALL
            .iter()
            .flat_map(|kind| std::iter::repeat_n(*kind, terrain.count(*kind)));

        for (kind, index) in kinds.zip(picks.iter()) {
            if let Some((x, y)) = cell_at(index, row_len) {
                world.add_obstacle(StaticObstacle::new(kind, cell_position(x, y)));
            }
        }

        info!(
            world = %id,
            width,
            height,
            seed,
            walls = terrain.walls,
            water_sources = terrain.water_sources,
            food_sources = terrain.food_sources,
            rest_areas = terrain.rest_areas,
            "world generated"
        );

        Ok(world)
    }
}

/// Map a row-major cell index back to `(x, y)`.
fn cell_at(index: usize, row_len: usize) -> Option<(u32, u32)> {
    let x = u32::try_from(index.checked_rem(row_len)?).ok()?;
    let y = u32::try_from(index.checked_div(row_len)?).ok()?;
    Some((x, y))
}
