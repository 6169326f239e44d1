//! The physical world of the Animalia simulation.
//!
//! A world is a rectangular grid of cells with a walkability mask, static
//! obstacles grouped by type, a seeded random source, and the tick clock.
//! Entities query it for destinations (a random water source, a random
//! walkable cell) and never mutate it.
//!
//! # Modules
//!
//! - [`clock`] -- [`WorldClock`], the only global time source.
//! - [`error`] -- Error types for world construction and advancement.
//! - [`generation`] -- Seeded obstacle placement from a [`TerrainConfig`].
//! - [`grid`] -- [`NavigationGrid`] walkability mask.
//! - [`world`] -- [`World`] and its random resource queries.

pub mod clock;
pub mod error;
pub mod generation;
pub mod grid;
pub mod world;

pub use clock::{ClockError, WorldClock};
pub use error::WorldError;
pub use generation::TerrainConfig;
pub use grid::NavigationGrid;
pub use world::{World, cell_position};
