//! Shared type definitions for the Animalia simulation.
//!
//! This crate is the single source of truth for the data that crosses crate
//! boundaries: geometry, vital stats, state labels, static obstacles, and the
//! read-only world snapshots. Snapshot types flow downstream to `TypeScript`
//! via `ts-rs` for the web client.
//!
//! # Modules
//!
//! - [`geometry`] -- [`Vector2D`] arithmetic
//! - [`ids`] -- Integer identifier newtypes
//! - [`enums`] -- Entity, state, vital, and obstacle enumerations
//! - [`structs`] -- Stats, obstacles, and snapshots

pub mod enums;
pub mod geometry;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EntityState, EntityType, ObstacleType, Vital};
pub use geometry::Vector2D;
pub use ids::{EntityId, WorldId};
pub use structs::{
    EntitySnapshot, StaticObstacle, StaticObstacles, Stats, WorldConfigSnapshot, WorldSnapshot,
};
