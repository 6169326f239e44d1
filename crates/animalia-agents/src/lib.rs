//! Goats: blackboard, motion, decision tree, and spawning.
//!
//! A goat is driven entirely by its behavior tree. Each tick the tree
//! walks from its root (or from wherever a `Running` leaf left it), checks
//! thirst, hunger, and tiredness in that order, and either heads for the
//! matching resource or roams between random cells.
//!
//! # Modules
//!
//! - [`actions`] -- Leaf bodies: destination picks, walking, consuming.
//! - [`config`] -- [`BehaviorConfig`] thresholds, costs, and speeds.
//! - [`entity`] -- [`Entity`], a goat plus its resumption state.
//! - [`error`] -- Error types for agent construction.
//! - [`goat`] -- [`Goat`] blackboard and straight-line motion.
//! - [`spawner`] -- Initial population placement.
//! - [`tree`] -- The goat tree builder.

pub mod actions;
pub mod config;
pub mod entity;
pub mod error;
pub mod goat;
pub mod spawner;
pub mod tree;

pub use config::{BehaviorConfig, NeedThresholds, WalkCost};
pub use entity::Entity;
pub use error::AgentError;
pub use goat::Goat;
pub use spawner::{PopulationConfig, spawn_goat, spawn_population};
pub use tree::{GoatContext, GoatTree, goat_tree};
