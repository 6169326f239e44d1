//! Line-oriented keyboard control.
//!
//! Each line typed on stdin is one command. Only the first non-blank
//! character counts, case-insensitively.

use std::io;
use std::sync::Arc;
use std::thread;

use animalia_core::{OperatorState, Simulation};
use animalia_types::EntityId;
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

/// The entity the `c` key relabels.
pub const CYCLED_ENTITY: EntityId = EntityId::new(0);

/// A keyboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `c`: advance entity 0's state label.
    CycleState,
    /// `p`: pause or resume the tick loop.
    TogglePause,
    /// `q`: stop the simulation.
    Quit,
}

impl Command {
    /// Parse one input line. Unknown and empty lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().chars().next()?.to_ascii_lowercase() {
            'c' => Some(Self::CycleState),
            'p' => Some(Self::TogglePause),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Carry out one command between ticks.
pub async fn apply(command: Command, simulation: &Mutex<Simulation>, operator: &OperatorState) {
    match command {
        Command::CycleState => {
            let cycled = simulation.lock().await.cycle_state(CYCLED_ENTITY);
            match cycled {
                Ok(state) => info!(entity = %CYCLED_ENTITY, %state, "state cycled from keyboard"),
                Err(e) => warn!(error = %e, "cannot cycle state"),
            }
        }
        Command::TogglePause => {
            let paused = operator.toggle_pause();
            info!(paused, "pause toggled from keyboard");
        }
        Command::Quit => {
            info!("quit requested from keyboard");
            operator.request_stop();
        }
    }
}

/// Lines read from stdin, or the error that ended reading.
pub type InputLines = mpsc::Receiver<io::Result<String>>;

/// Read stdin on a detached thread and forward each line.
///
/// The thread may stay parked in a blocking read after the receiver is
/// dropped. Nothing joins it, so it never holds up process exit.
fn spawn_stdin_reader() -> io::Result<InputLines> {
    let (tx, rx) = mpsc::channel(16);
    thread::Builder::new()
        .name(String::from("animalia-stdin"))
        .spawn(move || {
            for line in io::stdin().lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    return;
                }
            }
        })?;
    Ok(rx)
}

/// Carry out commands from `lines` until `q`, end of input, or a stop request.
///
/// Waiting on the channel is cancellable, so aborting the task running this
/// ends it at once.
pub async fn run_commands(
    mut lines: InputLines,
    simulation: Arc<Mutex<Simulation>>,
    operator: Arc<OperatorState>,
) {
    while !operator.is_stop_requested() {
        let line = match lines.recv().await {
            Some(Ok(line)) => line,
            None => {
                info!("stdin closed, keyboard control off");
                return;
            }
            Some(Err(e)) => {
                warn!(error = %e, "stdin read failed, keyboard control off");
                return;
            }
        };
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        apply(command, &simulation, &operator).await;
        if command == Command::Quit {
            return;
        }
    }
}

/// Keyboard control on the process's stdin.
pub async fn run_keyboard(simulation: Arc<Mutex<Simulation>>, operator: Arc<OperatorState>) {
    match spawn_stdin_reader() {
        Ok(lines) => run_commands(lines, simulation, operator).await,
        Err(e) => warn!(error = %e, "cannot start stdin reader, keyboard control off"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use animalia_core::config::SimulationBoundsConfig;
    use animalia_core::{SimulationConfig, build_simulation};
    use animalia_types::EntityState;

    use super::*;

    #[test]
    fn parse_reads_first_character() {
        assert_eq!(Command::parse("c"), Some(Command::CycleState));
        assert_eq!(Command::parse("  P\n"), Some(Command::TogglePause));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("x"), None);
    }

    #[tokio::test]
    async fn commands_reach_simulation_and_operator() {
        let mut config = SimulationConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.terrain.walls = 2;
        let sim = Mutex::new(build_simulation(&config).unwrap());
        let operator = OperatorState::new(100, SimulationBoundsConfig::default());

        apply(Command::CycleState, &sim, &operator).await;
        let state = sim.lock().await.entity(CYCLED_ENTITY).unwrap().state();
        assert_eq!(state, EntityState::FindFood);

        apply(Command::TogglePause, &sim, &operator).await;
        assert!(operator.is_paused());
        apply(Command::TogglePause, &sim, &operator).await;
        assert!(!operator.is_paused());

        apply(Command::Quit, &sim, &operator).await;
        assert!(operator.is_stop_requested());
    }

    fn small_simulation() -> Arc<Mutex<Simulation>> {
        let mut config = SimulationConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.terrain.walls = 2;
        Arc::new(Mutex::new(build_simulation(&config).unwrap()))
    }

    #[tokio::test]
    async fn command_loop_stops_at_quit() {
        let operator = Arc::new(OperatorState::new(100, SimulationBoundsConfig::default()));
        let (tx, rx) = mpsc::channel(4);
        for line in ["", "p", "q", "p"] {
            tx.send(Ok(String::from(line))).await.unwrap();
        }

        run_commands(rx, small_simulation(), Arc::clone(&operator)).await;
        assert!(operator.is_paused());
        assert!(operator.is_stop_requested());
    }

    #[tokio::test]
    async fn command_loop_ends_when_input_closes() {
        let operator = Arc::new(OperatorState::new(100, SimulationBoundsConfig::default()));
        let (tx, rx) = mpsc::channel(4);
        tx.send(Ok(String::from("p"))).await.unwrap();
        drop(tx);

        run_commands(rx, small_simulation(), Arc::clone(&operator)).await;
        assert!(operator.is_paused());
        assert!(!operator.is_stop_requested());
    }

    #[tokio::test]
    async fn abort_ends_a_command_loop_waiting_for_input() {
        let operator = Arc::new(OperatorState::new(100, SimulationBoundsConfig::default()));
        let (tx, rx) = mpsc::channel::<io::Result<String>>(4);
        let task = tokio::spawn(run_commands(rx, small_simulation(), operator));
        tokio::task::yield_now().await;

        task.abort();
        let joined = tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .unwrap();
        assert!(joined.unwrap_err().is_cancelled());
        drop(tx);
    }
}
