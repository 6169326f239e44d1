//! Shared application state for the Observer API server.
//!
//! [`AppState`] holds the broadcast channel for world snapshots and the
//! latest [`ObserverSnapshot`] that the REST endpoints serve.

use std::sync::Arc;

use animalia_core::operator::OperatorState;
use animalia_core::tick::TickSummary;
use animalia_types::WorldSnapshot;
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for world snapshots.
///
/// A subscriber that falls further behind receives
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest frame.
const BROADCAST_CAPACITY: usize = 64;

/// What the REST endpoints serve. Refreshed after every tick.
#[derive(Debug, Clone, Default)]
pub struct ObserverSnapshot {
    /// Latest world projection. `None` until the first tick publishes.
    pub world: Option<Arc<WorldSnapshot>>,
    /// Summary of the most recent tick.
    pub last_summary: Option<TickSummary>,
}

impl ObserverSnapshot {
    /// Tick of the latest world projection, or 0 before the first.
    pub fn current_tick(&self) -> u64 {
        self.world.as_ref().map_or(0, |w| w.tick)
    }

    /// Entity count of the latest world projection.
    pub fn entity_count(&self) -> usize {
        self.world.as_ref().map_or(0, |w| w.entities.len())
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Broadcast sender for world snapshots.
    pub tx: broadcast::Sender<Arc<WorldSnapshot>>,
    /// The latest published state.
    pub snapshot: Arc<RwLock<ObserverSnapshot>>,
    /// Shared operator control state (present when the simulation is running).
    pub operator_state: Option<Arc<OperatorState>>,
}

impl AppState {
    /// Create a new application state with an empty snapshot.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            snapshot: Arc::new(RwLock::new(ObserverSnapshot::default())),
            operator_state: None,
        }
    }

    /// Create a new application state with operator control state attached.
    pub fn with_operator(operator: Arc<OperatorState>) -> Self {
        Self {
            operator_state: Some(operator),
            ..Self::new()
        }
    }

    /// Subscribe to the snapshot broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<WorldSnapshot>> {
        self.tx.subscribe()
    }

    /// Push a snapshot to every connected `WebSocket` client.
    ///
    /// Returns the number of receivers. Zero connected clients is normal.
    pub fn broadcast(&self, snapshot: &Arc<WorldSnapshot>) -> usize {
        self.tx.send(Arc::clone(snapshot)).unwrap_or(0)
    }

    /// Record a finished tick and broadcast its world projection.
    ///
    /// Called from the tick loop, so the snapshot update uses `try_write`
    /// and is skipped if a reader holds the lock; the next tick catches
    /// up. Returns whether the stored snapshot was updated.
    pub fn publish(&self, summary: &TickSummary, world: WorldSnapshot) -> bool {
        let world = Arc::new(world);
        self.broadcast(&world);

        let Ok(mut snap) = self.snapshot.try_write() else {
            return false;
        };
        snap.world = Some(world);
        snap.last_summary = Some(summary.clone());
        true
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
