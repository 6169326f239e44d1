//! Tunables for goat decision-making and motion.
//!
//! These correspond to the `behavior` key of `animalia-config.yaml`. Every
//! field has a default, so a partial YAML block only overrides what it
//! names. The struct is `Copy` and captured by value into the tree's
//! leaf closures when the tree is built.

use animalia_types::Vital;
use serde::{Deserialize, Serialize};

/// When a need becomes urgent and when it counts as satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedThresholds {
    /// The need branch fires when the stat is at or above this value.
    pub trigger: u8,
    /// Consuming stops once the stat is at or below this value.
    pub satisfied: u8,
}

impl NeedThresholds {
    /// Thresholds from explicit values.
    pub const fn new(trigger: u8, satisfied: u8) -> Self {
        Self { trigger, satisfied }
    }
}

/// Stat increase paid for every tick spent walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkCost {
    /// Hunger added per moving tick.
    #[serde(default = "default_walk_hunger")]
    pub hunger: u8,
    /// Thirst added per moving tick.
    #[serde(default = "default_walk_thirst")]
    pub thirst: u8,
    /// Tiredness added per moving tick.
    #[serde(default = "default_walk_tiredness")]
    pub tiredness: u8,
}

impl WalkCost {
    /// Cost for one vital.
    pub const fn get(&self, vital: Vital) -> u8 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Tiredness => self.tiredness,
        }
    }
}

impl Default for WalkCost {
    fn default() -> Self {
        Self {
            hunger: default_walk_hunger(),
            thirst: default_walk_thirst(),
            tiredness: default_walk_tiredness(),
        }
    }
}

const fn default_walk_hunger() -> u8 {
    1
}

const fn default_walk_thirst() -> u8 {
    2
}

const fn default_walk_tiredness() -> u8 {
    1
}

/// Thresholds, costs, and motion constants for the goat tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Thirst branch thresholds (default 80 / 20).
    #[serde(default = "default_thirst")]
    pub thirst: NeedThresholds,

    /// Hunger branch thresholds (default 80 / 25).
    #[serde(default = "default_hunger")]
    pub hunger: NeedThresholds,

    /// Tiredness branch thresholds (default 80 / 30).
    #[serde(default = "default_tiredness")]
    pub tiredness: NeedThresholds,

    /// Amount a stat drops per tick while consuming at the target (default 2).
    #[serde(default = "default_consume_per_tick")]
    pub consume_per_tick: u8,

    /// Stat cost of each moving tick.
    #[serde(default)]
    pub walk_cost: WalkCost,

    /// Distance at which a target counts as reached (default 0.5).
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius: f64,

    /// Distance covered per moving tick (default 1.0).
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// A roaming goat that has arrived only finishes its roam on ticks
    /// divisible by this period (default 40).
    #[serde(default = "default_roam_idle_period")]
    pub roam_idle_period: u64,
}

const fn default_thirst() -> NeedThresholds {
    NeedThresholds::new(80, 20)
}

const fn default_hunger() -> NeedThresholds {
    NeedThresholds::new(80, 25)
}

const fn default_tiredness() -> NeedThresholds {
    NeedThresholds::new(80, 30)
}

const fn default_consume_per_tick() -> u8 {
    2
}

const fn default_arrival_radius() -> f64 {
    0.5
}

const fn default_speed() -> f64 {
    1.0
}

const fn default_roam_idle_period() -> u64 {
    40
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            thirst: default_thirst(),
            hunger: default_hunger(),
            tiredness: default_tiredness(),
            consume_per_tick: default_consume_per_tick(),
            walk_cost: WalkCost::default(),
            arrival_radius: default_arrival_radius(),
            speed: default_speed(),
            roam_idle_period: default_roam_idle_period(),
        }
    }
}

impl BehaviorConfig {
    /// Thresholds for one vital.
    pub const fn thresholds(&self, vital: Vital) -> NeedThresholds {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Tiredness => self.tiredness,
        }
    }

    /// Check the values a running tree cannot cope with.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(format!("behavior.speed must be positive, got {}", self.speed));
        }
        if !self.arrival_radius.is_finite() || self.arrival_radius < 0.0 {
            return Err(format!(
                "behavior.arrival_radius must be non-negative, got {}",
                self.arrival_radius
            ));
        }
        if self.roam_idle_period == 0 {
            return Err(String::from("behavior.roam_idle_period must be at least 1"));
        }
        if self.consume_per_tick == 0 {
            return Err(String::from("behavior.consume_per_tick must be at least 1"));
        }
        for vital in Vital::ALL {
            let t = self.thresholds(vital);
            if t.satisfied >= t.trigger {
                return Err(format!(
                    "behavior.{vital}: satisfied ({}) must be below trigger ({})",
                    t.satisfied, t.trigger
                ));
            }
        }
        Ok(())
    }
}
