//! Configuration loading and typed config structures for the Animalia
//! simulation.
//!
//! The canonical configuration lives in `animalia-config.yaml` at the
//! project root. Every section and every field has a default, so an empty
//! file (or no file at all) yields a runnable 100x100 world with five goats.
//!
//! Sections owned by other crates are re-used directly:
//! [`TerrainConfig`] from `animalia-world`, and [`PopulationConfig`] and
//! [`BehaviorConfig`] from `animalia-agents`.

use std::path::Path;

use animalia_agents::{BehaviorConfig, PopulationConfig};
use animalia_types::Vital;
use animalia_world::TerrainConfig;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `world.seed`.
pub const SEED_ENV_VAR: &str = "ANIMALIA_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but cannot be used.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `animalia-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, size, timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Obstacle counts scattered at world creation.
    #[serde(default)]
    pub terrain: TerrainConfig,

    /// Initial goat population.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Goat tree thresholds, costs, and speeds.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Passive per-tick stat decay applied after every entity has ticked.
    #[serde(default)]
    pub decay: DecayConfig,

    /// Run boundaries.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Observer HTTP server.
    #[serde(default)]
    pub observer: ObserverConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `ANIMALIA_SEED` overrides `world.seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) for an existing file.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML and
    /// [`ConfigError::Invalid`] if a value is unusable.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `ANIMALIA_SEED` is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref())
    }

    /// Override `world.seed` from a raw string, if one is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the string is not a `u64`.
    pub fn apply_seed_override(&mut self, raw: Option<&str>) -> Result<(), ConfigError> {
        let Some(raw) = raw else {
            return Ok(());
        };
        self.world.seed = raw.trim().parse().map_err(|err: std::num::ParseIntError| {
            ConfigError::Invalid {
                field: "world.seed",
                reason: format!("{SEED_ENV_VAR}={raw:?}: {err}"),
            }
        })?;
        Ok(())
    }

    /// Reject values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::Invalid {
                field: "world",
                reason: format!(
                    "width and height must be positive, got {}x{}",
                    self.world.width, self.world.height
                ),
            });
        }
        if self.world.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "world.tick_interval_ms",
                reason: String::from("must be at least 1"),
            });
        }
        if self.world.render_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "world.render_interval_ms",
                reason: String::from("must be at least 1"),
            });
        }
        let cells = u64::from(self.world.width).saturating_mul(u64::from(self.world.height));
        let requested = u64::try_from(self.terrain.total()).unwrap_or(u64::MAX);
        if requested >= cells {
            return Err(ConfigError::Invalid {
                field: "terrain",
                reason: format!(
                    "{requested} obstacles leave no free cell on a {}x{} grid",
                    self.world.width, self.world.height
                ),
            });
        }
        self.behavior
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                field: "behavior",
                reason,
            })?;
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Grid width in cells.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Grid height in cells.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Real-time milliseconds between terminal redraws.
    #[serde(default = "default_render_interval_ms")]
    pub render_interval_ms: u64,
}

impl WorldConfig {
    /// Ticks per second implied by `tick_interval_ms` (0 when unpaced).
    pub fn tps(&self) -> u32 {
        1000u64
            .checked_div(self.tick_interval_ms)
            .and_then(|tps| u32::try_from(tps).ok())
            .unwrap_or(0)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            width: default_width(),
            height: default_height(),
            tick_interval_ms: default_tick_interval_ms(),
            render_interval_ms: default_render_interval_ms(),
        }
    }
}

/// Passive per-tick stat increase, applied to every entity after the
/// tree pass. All zero by default, so stats only move while walking or
/// consuming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Hunger added per tick.
    #[serde(default)]
    pub hunger: u8,
    /// Thirst added per tick.
    #[serde(default)]
    pub thirst: u8,
    /// Tiredness added per tick.
    #[serde(default)]
    pub tiredness: u8,
}

impl DecayConfig {
    /// Rate for one vital.
    pub const fn get(&self, vital: Vital) -> u8 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Thirst => self.thirst,
            Vital::Tiredness => self.tiredness,
        }
    }

    /// Whether every rate is zero.
    pub const fn is_none(&self) -> bool {
        self.hunger == 0 && self.thirst == 0 && self.tiredness == 0
    }
}

/// Simulation boundary parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Stop after this many ticks (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Observer HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Whether to start the observer at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bind address.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

fn default_world_name() -> String {
    String::from("animalia")
}

const fn default_seed() -> u64 {
    42
}

const fn default_width() -> u32 {
    100
}

const fn default_height() -> u32 {
    100
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_render_interval_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_true() -> bool {
    true
}

fn default_observer_host() -> String {
    String::from("0.0.0.0")
}

const fn default_observer_port() -> u16 {
    8080
}
