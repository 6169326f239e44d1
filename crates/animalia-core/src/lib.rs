//! Simulation loop, configuration, and orchestration for Animalia.
//!
//! This crate owns the [`Simulation`]: one world, its goats, and the tick
//! that advances them together. Around it sit the operator controls and
//! the async runner that paces ticks in real time.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `animalia-config.yaml` into
//!   strongly-typed structs.
//! - [`operator`] -- Pause, resume, stop, and tick-speed control.
//! - [`runner`] -- [`run_simulation`], the paced tick loop.
//! - [`setup`] -- [`build_simulation`] from a [`SimulationConfig`].
//! - [`tick`] -- [`Simulation`] and the per-tick cycle.

pub mod config;
pub mod operator;
pub mod runner;
pub mod setup;
pub mod tick;

pub use config::{ConfigError, SimulationConfig};
pub use operator::{OperatorState, SimulationEndReason, SimulationStatus};
pub use runner::{NoOpCallback, RunnerError, SimulationResult, TickCallback, run_simulation};
pub use setup::{SetupError, build_simulation};
pub use tick::{Simulation, StateTransition, TickError, TickSummary};
