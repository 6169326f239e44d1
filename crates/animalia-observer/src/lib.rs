//! Observer API server for the Animalia simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/world`) streaming a [`WorldSnapshot`]
//!   after every tick via [`tokio::sync::broadcast`]
//! - **REST endpoints** for the latest world snapshot, the entity list,
//!   single entities, and the last tick summary
//! - **Operator REST endpoints** for runtime control (pause, resume,
//!   speed, status, stop)
//! - **Greeting** (`GET /`) answering `Hello, world!`
//!
//! # Architecture
//!
//! The observer reads from an in-memory [`ObserverSnapshot`] that the
//! engine refreshes after each tick. REST reads never touch the live
//! simulation, so the observer cannot stall the tick loop.
//!
//! [`WorldSnapshot`]: animalia_types::WorldSnapshot
//! [`ObserverSnapshot`]: state::ObserverSnapshot

pub mod error;
pub mod handlers;
pub mod operator;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_observer};
pub use state::{AppState, ObserverSnapshot};
