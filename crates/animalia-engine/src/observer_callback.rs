//! Tick callback that feeds the Observer API state.
//!
//! After each tick, this callback stores a fresh [`WorldSnapshot`] and the
//! tick summary in the observer's [`AppState`] and broadcasts the snapshot
//! to connected `WebSocket` clients.
//!
//! [`WorldSnapshot`]: animalia_types::WorldSnapshot

use std::sync::Arc;

use animalia_core::runner::TickCallback;
use animalia_core::tick::{Simulation, TickSummary};
use animalia_observer::state::AppState;
use tracing::debug;

/// Callback that bridges the tick cycle to the Observer API.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl TickCallback for ObserverCallback {
    fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation) {
        for transition in &summary.transitions {
            debug!(
                tick = summary.tick,
                entity = %transition.entity,
                from = %transition.from,
                to = %transition.to,
                "state transition"
            );
        }

        let stored = self.state.publish(summary, simulation.snapshot());
        if !stored {
            debug!(tick = summary.tick, "observer snapshot busy, skipped store");
        }
    }
}
