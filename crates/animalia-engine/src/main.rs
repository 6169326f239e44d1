//! Engine binary for the Animalia simulation.
//!
//! Wires configuration, world generation, the goat population, the
//! observer API, the terminal renderer, and the keyboard into one
//! process, then runs the tick loop until a stop or the tick limit.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `animalia-config.yaml` (or defaults)
//! 3. Initialize structured logging on stderr
//! 4. Generate the world and spawn the initial goats
//! 5. Create operator state from simulation bounds
//! 6. Start the observer API, keyboard, Ctrl-C, and render tasks
//! 7. Run the simulation loop
//! 8. Log the result and draw the final frame

mod error;
mod input;
mod observer_callback;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use animalia_core::config::{LogFormat, LoggingConfig};
use animalia_core::runner::{self, NoOpCallback, TickCallback};
use animalia_core::{OperatorState, Simulation, SimulationConfig, build_simulation};
use animalia_observer::ServerConfig;
use animalia_observer::state::AppState;
use clap::Parser;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::observer_callback::ObserverCallback;

/// Goats wandering a grid, driven by behavior trees.
#[derive(Parser, Debug)]
#[command(name = "animalia-engine")]
#[command(about = "Run the Animalia goat simulation")]
struct Args {
    /// Path to the YAML configuration file (defaults apply if missing)
    #[arg(long, short = 'c', default_value = "animalia-config.yaml")]
    config: PathBuf,

    /// Random seed; overrides `world.seed` and `ANIMALIA_SEED`
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks (0 = unlimited)
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Do not draw the ASCII map
    #[arg(long)]
    headless: bool,

    /// Do not start the observer HTTP server
    #[arg(long)]
    no_observer: bool,
}

impl Args {
    fn apply_to(&self, config: &mut SimulationConfig) -> Result<(), EngineError> {
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.simulation.max_ticks = max_ticks;
        }
        if self.no_observer {
            config.observer.enabled = false;
        }
        config.validate()?;
        Ok(())
    }
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = SimulationConfig::load_or_default(&args.config)?;
    args.apply_to(&mut config)?;

    init_logging(&config.logging)?;
    info!(
        config_path = %args.config.display(),
        world_name = config.world.name,
        seed = config.world.seed,
        width = config.world.width,
        height = config.world.height,
        tick_interval_ms = config.world.tick_interval_ms,
        "configuration loaded"
    );

    let simulation = Arc::new(Mutex::new(build_simulation(&config).map_err(EngineError::from)?));

    let operator = Arc::new(OperatorState::new(
        config.world.tick_interval_ms,
        config.simulation,
    ));
    info!(
        max_ticks = operator.max_ticks(),
        tick_interval_ms = operator.tick_interval_ms(),
        "operator state initialized"
    );

    let mut callback: Box<dyn TickCallback> = if config.observer.enabled {
        let app_state = Arc::new(AppState::with_operator(Arc::clone(&operator)));
        animalia_observer::spawn_observer(
            ServerConfig::from(&config.observer),
            Arc::clone(&app_state),
        )
        .map_err(EngineError::from)?;
        Box::new(ObserverCallback::new(app_state))
    } else {
        info!("observer disabled");
        Box::new(NoOpCallback)
    };

    spawn_ctrl_c(Arc::clone(&operator));
    let keyboard = tokio::spawn(input::run_keyboard(
        Arc::clone(&simulation),
        Arc::clone(&operator),
    ));
    let renderer = (!args.headless).then(|| {
        spawn_renderer(
            Arc::clone(&simulation),
            Arc::clone(&operator),
            Duration::from_millis(config.world.render_interval_ms),
        )
    });

    let result = runner::run_simulation(&simulation, &operator, callback.as_mut())
        .await
        .map_err(EngineError::from)?;

    keyboard.abort();
    if let Some(renderer) = renderer {
        renderer.abort();
        draw(&simulation, &operator).await;
    }

    runner::log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "animalia-engine shutdown complete"
    );

    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`. Output goes to stderr so the
/// renderer owns stdout.
fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EngineError::Logging {
            message: format!("bad log level {:?}: {e}", config.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}

/// Turn Ctrl-C into an operator stop so the runner exits cleanly.
fn spawn_ctrl_c(operator: Arc<OperatorState>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping");
                operator.request_stop();
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl-C"),
        }
    });
}

/// Redraw the terminal every `interval` until the task is aborted.
fn spawn_renderer(
    simulation: Arc<Mutex<Simulation>>,
    operator: Arc<OperatorState>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            draw(&simulation, &operator).await;
        }
    })
}

async fn draw(simulation: &Mutex<Simulation>, operator: &OperatorState) {
    let snapshot = simulation.lock().await.snapshot();
    let frame = render::render_frame(&snapshot, operator.is_paused());

    if let Err(e) = write_frame(&mut std::io::stdout().lock(), &frame) {
        warn!(error = %e, "failed to draw frame");
    }
}

fn write_frame(out: &mut impl Write, frame: &str) -> std::io::Result<()> {
    out.write_all(render::CLEAR_SCREEN.as_bytes())?;
    out.write_all(frame.as_bytes())?;
    out.flush()
}
