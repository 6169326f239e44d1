//! Core data structs: vital stats, static obstacles, and the read-only
//! snapshots handed to renderers and the web client.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EntityState, EntityType, ObstacleType, Vital};
use crate::geometry::Vector2D;
use crate::ids::{EntityId, WorldId};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Vital statistics of an entity. Higher is worse for every field.
///
/// Every mutation goes through [`Stats::adjust`] (or [`Stats::set`]), which
/// clamps the result to `[0, Stats::MAX]`. Values outside that range are
/// never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Stats {
    /// 0 = full, 100 = starving.
    pub hunger: u8,
    /// 0 = hydrated, 100 = dehydrated.
    pub thirst: u8,
    /// 0 = fully rested, 100 = exhausted.
    pub tiredness: u8,
}

impl Stats {
    /// Upper bound of every vital.
    pub const MAX: u8 = 100;

    /// Create stats, clamping each value to `[0, 100]`.
    pub fn new(hunger: u8, thirst: u8, tiredness: u8) -> Self {
        Self {
            hunger: hunger.min(Self::MAX),
            thirst: thirst.min(Self::MAX),
            tiredness: tiredness.min(Self::MAX),
        }
    }

    /// Read one vital.
    pub const fn get(&self, vital: Vital) -> u8 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Tiredness => self.tiredness,
        }
    }

    /// Overwrite one vital, clamped to `[0, 100]`.
    pub fn set(&mut self, vital: Vital, value: u8) {
        let clamped = value.min(Self::MAX);
        match vital {
            Vital::Hunger => self.hunger = clamped,
            Vital::Thirst => self.thirst = clamped,
            Vital::Tiredness => self.tiredness = clamped,
        }
    }

    /// Add a signed delta to one vital and clamp the result to `[0, 100]`.
    ///
    /// Returns the new value.
    pub fn adjust(&mut self, vital: Vital, delta: i32) -> u8 {
        let current = i32::from(self.get(vital));
        let next = current.saturating_add(delta).clamp(0, i32::from(Self::MAX));
        let value = u8::try_from(next).unwrap_or(Self::MAX);
        self.set(vital, value);
        value
    }

    /// Re-clamp every vital. A no-op unless a field was written directly.
    pub fn clamp(&mut self) {
        *self = Self::new(self.hunger, self.thirst, self.tiredness);
    }
}

// ---------------------------------------------------------------------------
// Static obstacles
// ---------------------------------------------------------------------------

/// A static obstacle or resource placed at world creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StaticObstacle {
    /// What kind of obstacle this is.
    #[serde(rename = "type")]
    pub kind: ObstacleType,
    /// Cell position of the obstacle.
    pub position: Vector2D,
}

impl StaticObstacle {
    /// Create an obstacle of the given kind at the given position.
    pub const fn new(kind: ObstacleType, position: Vector2D) -> Self {
        Self { kind, position }
    }
}

/// All static obstacles of a world, grouped by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StaticObstacles {
    /// Impassable walls.
    pub walls: Vec<StaticObstacle>,
    /// Drinking spots.
    pub water_sources: Vec<StaticObstacle>,
    /// Eating spots.
    pub food_sources: Vec<StaticObstacle>,
    /// Rest areas.
    pub rest_areas: Vec<StaticObstacle>,
}

impl StaticObstacles {
    /// Obstacles of one type.
    pub fn of_type(&self, kind: ObstacleType) -> &[StaticObstacle] {
        match kind {
            ObstacleType::Wall => &self.walls,
            ObstacleType::WaterSource => &self.water_sources,
            ObstacleType::FoodSource => &self.food_sources,
            ObstacleType::RestArea => &self.rest_areas,
        }
    }

    /// Add an obstacle to the collection matching its type.
    pub fn push(&mut self, obstacle: StaticObstacle) {
        let bucket = match obstacle.kind {
            ObstacleType::Wall => &mut self.walls,
            ObstacleType::WaterSource => &mut self.water_sources,
            ObstacleType::FoodSource => &mut self.food_sources,
            ObstacleType::RestArea => &mut self.rest_areas,
        };
        bucket.push(obstacle);
    }

    /// Iterate over every obstacle of every type.
    pub fn iter(&self) -> impl Iterator<Item = &StaticObstacle> {
        self.walls
            .iter()
            .chain(&self.water_sources)
            .chain(&self.food_sources)
            .chain(&self.rest_areas)
    }

    /// Total number of obstacles.
    pub fn len(&self) -> usize {
        ObstacleType::ALL
            .iter()
            .map(|kind| self.of_type(*kind).len())
            .sum()
    }

    /// Whether there are no obstacles at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only projection of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EntitySnapshot {
    /// Entity identifier.
    pub id: EntityId,
    /// Archetype.
    #[serde(rename = "type")]
    pub kind: EntityType,
    /// Current position.
    pub position: Vector2D,
    /// Current high-level state label.
    pub state: EntityState,
    /// Unit direction of the last movement step.
    pub direction: Vector2D,
    /// Current destination, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub target_pos: Option<Vector2D>,
    /// Vital stats.
    pub stats: Stats,
    /// Tick at which the state label last changed.
    #[ts(type = "number")]
    pub last_state_change_at: u64,
}

/// Runtime configuration echoed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldConfigSnapshot {
    /// Ticks per second the driver loop aims for.
    pub tps: u32,
}

/// Read-only projection of the whole world, produced once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// World identifier.
    pub id: WorldId,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Tick at which the snapshot was taken.
    #[ts(type = "number")]
    pub tick: u64,
    /// Row-major walkability grid (`navigation_grid[y][x]`).
    pub navigation_grid: Vec<Vec<bool>>,
    /// Static obstacles grouped by type.
    pub static_obstacles: StaticObstacles,
    /// Every entity, in tick order.
    pub entities: Vec<EntitySnapshot>,
    /// Driver configuration.
    pub config: WorldConfigSnapshot,
}
