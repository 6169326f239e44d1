//! Simulation loop runner with operator controls.
//!
//! [`run_simulation`] drives [`Simulation::tick`] on the operator's
//! cadence and adds the control plane around it:
//!
//! - **Bounded simulation**: stop after `max_ticks`
//! - **Pause/resume**: operator can halt and continue the tick loop
//! - **Variable tick speed**: tick interval adjustable at runtime
//! - **Operator stop**: clean stop from the keyboard, Ctrl-C, or HTTP
//!
//! The simulation lives behind a [`tokio::sync::Mutex`]. The runner holds
//! the lock for exactly one tick plus its callback, so renderers and the
//! keyboard task only ever see it between ticks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::operator::{OperatorState, SimulationEndReason};
use crate::tick::{Simulation, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes, while the simulation lock
/// is still held.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation);
}

/// A tick callback that does nothing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _simulation: &Simulation) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails unrecoverably.
pub async fn run_simulation(
    simulation: &Arc<Mutex<Simulation>>,
    operator: &Arc<OperatorState>,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = operator.max_ticks(),
        tick_interval_ms = operator.tick_interval_ms(),
        "simulation starting"
    );

    loop {
        if operator.is_paused() {
            info!("simulation paused, waiting for resume");
            operator.wait_if_paused().await;
            info!("simulation resumed");
        }

        if operator.is_stop_requested() {
            info!("operator stop requested");
            return finish(operator, SimulationEndReason::OperatorStop, last_summary, total_ticks)
                .await;
        }

        let summary = {
            let mut sim = simulation.lock().await;
            let summary = sim.tick()?;
            callback.on_tick(&summary, &sim);
            summary
        };
        total_ticks = total_ticks.saturating_add(1);

        if operator.tick_limit_reached(summary.tick) {
            info!(
                tick = summary.tick,
                max_ticks = operator.max_ticks(),
                "tick limit reached"
            );
            return finish(
                operator,
                SimulationEndReason::MaxTicksReached,
                Some(summary),
                total_ticks,
            )
            .await;
        }

        last_summary = Some(summary);

        let interval_ms = operator.tick_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(Duration::from_millis(interval_ms)).await;
        }
    }
}

async fn finish(
    operator: &OperatorState,
    reason: SimulationEndReason,
    final_summary: Option<TickSummary>,
    total_ticks: u64,
) -> Result<SimulationResult, RunnerError> {
    operator.set_end_reason(reason).await;
    Ok(SimulationResult {
        end_reason: reason,
        final_summary,
        total_ticks,
    })
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            entities = summary.entity_count,
            states = ?summary.state_counts,
            "final tick summary"
        );
    } else {
        warn!("simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use animalia_agents::{BehaviorConfig, Entity, Goat, goat_tree};
    use animalia_types::{EntityId, Stats, Vector2D, WorldId};
    use animalia_world::World;

    use super::*;
    use crate::config::{DecayConfig, SimulationBoundsConfig};

    fn shared_sim() -> Arc<Mutex<Simulation>> {
        let world = World::new(WorldId::new(1), 12, 12, 99).unwrap();
        let tree = Arc::new(goat_tree(BehaviorConfig::default()).unwrap());
        let goat = Goat::new(EntityId::new(0), Vector2D::new(3.0, 3.0), Stats::new(1, 2, 3));
        let sim = Simulation::new(world, vec![Entity::new(goat, tree)], DecayConfig::default(), 0);
        Arc::new(Mutex::new(sim))
    }

    struct Counting {
        ticks: Vec<u64>,
    }

    impl TickCallback for Counting {
        fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation) {
            assert_eq!(summary.tick, simulation.current_tick());
            self.ticks.push(summary.tick);
        }
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let sim = shared_sim();
        let operator = Arc::new(OperatorState::new(0, SimulationBoundsConfig { max_ticks: 5 }));
        let mut cb = Counting { ticks: Vec::new() };

        let result = run_simulation(&sim, &operator, &mut cb).await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_summary.unwrap().tick, 5);
        assert_eq!(cb.ticks, vec![1, 2, 3, 4, 5]);
        assert_eq!(sim.lock().await.current_tick(), 5);
        assert_eq!(
            operator.end_reason().await,
            Some(SimulationEndReason::MaxTicksReached)
        );
    }

    #[tokio::test]
    async fn operator_stop_before_first_tick() {
        let sim = shared_sim();
        let operator = Arc::new(OperatorState::new(0, SimulationBoundsConfig::default()));
        operator.request_stop();

        let result = run_simulation(&sim, &operator, &mut NoOpCallback)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn stop_while_paused_ends_the_run() {
        let sim = shared_sim();
        let operator = Arc::new(OperatorState::new(0, SimulationBoundsConfig::default()));
        operator.pause();

        let handle = {
            let sim = Arc::clone(&sim);
            let operator = Arc::clone(&operator);
            tokio::spawn(async move { run_simulation(&sim, &operator, &mut NoOpCallback).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(sim.lock().await.current_tick(), 0);
        operator.request_stop();

        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
    }
}
