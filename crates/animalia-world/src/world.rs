//! The world: grid, static obstacles, seeded randomness, and the clock.
//!
//! The world is the `W` parameter of every entity's behavior tree. Leaves
//! use it to pick destinations and read the tick counter; nothing in the
//! tree can change the grid or the obstacle lists after generation.

use animalia_types::{ObstacleType, StaticObstacle, StaticObstacles, Vector2D, WorldId};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::clock::WorldClock;
use crate::error::WorldError;
use crate::grid::NavigationGrid;

/// Random cell draws tried before falling back to a full grid scan.
const WALKABLE_SAMPLE_ATTEMPTS: u32 = 32;

/// A grid world with static obstacles and resources.
#[derive(Debug, Clone)]
pub struct World {
    id: WorldId,
    grid: NavigationGrid,
    obstacles: StaticObstacles,
    rng: StdRng,
    clock: WorldClock,
}

impl World {
    /// An empty, fully walkable world seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either side is zero.
    pub fn new(id: WorldId, width: u32, height: u32, seed: u64) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            id,
            grid: NavigationGrid::open(width, height),
            obstacles: StaticObstacles::default(),
            rng: StdRng::seed_from_u64(seed),
            clock: WorldClock::new(),
        })
    }

    /// World identifier.
    pub const fn id(&self) -> WorldId {
        self.id
    }

    /// Width in cells.
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height in cells.
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// The walkability grid.
    pub const fn grid(&self) -> &NavigationGrid {
        &self.grid
    }

    /// Static obstacles grouped by type.
    pub const fn obstacles(&self) -> &StaticObstacles {
        &self.obstacles
    }

    /// The current tick.
    pub const fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// The world clock.
    pub const fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// Advance the clock by one tick and return the new tick.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Clock`] on tick overflow.
    pub fn advance_clock(&mut self) -> Result<u64, WorldError> {
        Ok(self.clock.advance()?)
    }

    /// The world's random source. All randomness in a run flows from here.
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Place an obstacle. Walls also block their grid cell.
    pub fn add_obstacle(&mut self, obstacle: StaticObstacle) {
        let blocked = match obstacle.kind {
            ObstacleType::Wall => self.grid.cell_of(obstacle.position),
            _ => None,
        };
        if let Some((x, y)) = blocked {
            self.grid.set_walkable(x, y, false);
        }
        self.obstacles.push(obstacle);
    }

    /// A uniformly random walkable cell, or `None` if no cell is walkable.
    pub fn random_walkable_position(&mut self) -> Option<Vector2D> {
        let (width, height) = (self.grid.width(), self.grid.height());
        for _ in 0..WALKABLE_SAMPLE_ATTEMPTS {
            let x = self.rng.random_range(0..width);
            let y = self.rng.random_range(0..height);
            if self.grid.is_walkable(x, y) {
                return Some(cell_position(x, y));
            }
        }
        // Mostly blocked grid: pick among the walkable cells directly.
        let cells: Vec<(u32, u32)> = self.grid.walkable_cells().collect();
        cells
            .choose(&mut self.rng)
            .map(|(x, y)| cell_position(*x, *y))
    }

    /// Position of a uniformly random obstacle of `kind`, if any exist.
    pub fn random_obstacle(&mut self, kind: ObstacleType) -> Option<Vector2D> {
        self.obstacles
            .of_type(kind)
            .choose(&mut self.rng)
            .map(|obstacle| obstacle.position)
    }

    /// A random water source.
    pub fn random_water_source(&mut self) -> Option<Vector2D> {
        self.random_obstacle(ObstacleType::WaterSource)
    }

    /// A random food source.
    pub fn random_food_source(&mut self) -> Option<Vector2D> {
        self.random_obstacle(ObstacleType::FoodSource)
    }

    /// A random rest area.
    pub fn random_rest_area(&mut self) -> Option<Vector2D> {
        self.random_obstacle(ObstacleType::RestArea)
    }
}

/// World coordinates of a cell's origin.
pub fn cell_position(x: u32, y: u32) -> Vector2D {
    Vector2D::new(f64::from(x), f64::from(y))
}
