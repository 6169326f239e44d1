//! Enumeration types for the Animalia simulation.
//!
//! Serialized names are `snake_case` to match the JSON consumed by the web
//! client (`roaming`, `find_water`, `water_source`, ...).

use core::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The archetype of an entity.
///
/// Only goats carry a behavior tree; `Wolf` exists so snapshots and
/// renderers can label a second species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A grazing goat driven by the goat behavior tree.
    Goat,
    /// A wolf. Label only.
    Wolf,
}

// ---------------------------------------------------------------------------
// Entity state label
// ---------------------------------------------------------------------------

/// The externally visible high-level state of an entity.
///
/// The label is advisory: it is written by the same behavior-tree actions
/// that choose a destination, so it always names the branch that is
/// currently active. Renderers and diagnostics read it; nothing in the
/// decision logic branches on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    /// Wandering between random walkable cells.
    #[default]
    Roaming,
    /// Heading to (or eating at) a food source.
    FindFood,
    /// Heading to (or drinking at) a water source.
    FindWater,
    /// Heading to (or resting at) a resting spot.
    Resting,
}

impl EntityState {
    /// Every state, in cycling order.
    pub const ALL: [Self; 4] = [Self::Roaming, Self::FindFood, Self::FindWater, Self::Resting];

    /// The next state in the debug cycle
    /// `Roaming -> FindFood -> FindWater -> Resting -> Roaming`.
    pub const fn next(self) -> Self {
        match self {
            Self::Roaming => Self::FindFood,
            Self::FindFood => Self::FindWater,
            Self::FindWater => Self::Resting,
            Self::Resting => Self::Roaming,
        }
    }

    /// Serialized label (matches the JSON representation).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Roaming => "roaming",
            Self::FindFood => "find_food",
            Self::FindWater => "find_water",
            Self::Resting => "resting",
        }
    }

    /// Single-character glyph used by the ASCII renderer.
    pub const fn glyph(self) -> char {
        match self {
            Self::Roaming => 'R',
            Self::FindFood => 'F',
            Self::FindWater => 'W',
            Self::Resting => 'S',
        }
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Vitals
// ---------------------------------------------------------------------------

/// One of the three tracked vital statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    /// 0 = full, 100 = starving.
    Hunger,
    /// 0 = hydrated, 100 = dehydrated.
    Thirst,
    /// 0 = fully rested, 100 = exhausted.
    Tiredness,
}

impl Vital {
    /// Every vital, in need-branch priority order.
    pub const ALL: [Self; 3] = [Self::Thirst, Self::Hunger, Self::Tiredness];
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hunger => "hunger",
            Self::Thirst => "thirst",
            Self::Tiredness => "tiredness",
        })
    }
}

// ---------------------------------------------------------------------------
// Static obstacles
// ---------------------------------------------------------------------------

/// Kind of a static obstacle placed at world creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ObstacleType {
    /// Impassable wall cell (marks the grid non-walkable).
    Wall,
    /// Place to drink.
    WaterSource,
    /// Place to eat.
    FoodSource,
    /// Designated rest area.
    RestArea,
}

impl ObstacleType {
    /// Every obstacle type.
    pub const ALL: [Self; 4] = [Self::Wall, Self::WaterSource, Self::FoodSource, Self::RestArea];

    /// Single-character glyph used by the ASCII renderer.
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::WaterSource => '~',
            Self::FoodSource => '*',
            Self::RestArea => '=',
        }
    }
}
