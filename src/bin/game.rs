//! Game launcher

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use winit::event_loop::{ControlFlow, EventLoop};

use fish::app::{App, AppConfig};
use fish::build_info;
use fish::health;
use fish::sim::MovementMode;

#[derive(Debug, Parser)]
#[command(name = "game", version, about = "Guide the mouse to the cheese")]
struct Cli {
    /// Configuration profile to load (config/<profile>.toml)
    #[arg(long, env = "APP_PROFILE", default_value = "release")]
    profile: String,

    /// Run the startup self-checks, print a report and exit
    #[arg(long)]
    health_check: bool,

    /// Override how held arrow keys combine
    #[arg(long, value_enum)]
    movement: Option<Movement>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Movement {
    /// Only the highest-priority arrow key counts
    Priority,
    /// Held arrow keys add up, allowing diagonals
    Combined,
}

impl From<Movement> for MovementMode {
    fn from(movement: Movement) -> Self {
        match movement {
            Movement::Priority => MovementMode::Priority,
            Movement::Combined => MovementMode::Combined,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.health_check {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    info!(version = %build_info::version_string(), "Launching");

    let mut config = AppConfig::load(&cli.profile)
        .with_context(|| format!("failed to load configuration profile '{}'", cli.profile))?;
    if let Some(movement) = cli.movement {
        config.level.movement = movement.into();
    }

    let mut app = App::new(config)?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    info!(ticks = app.world().tick_count(), "Exited cleanly");
    Ok(())
}
