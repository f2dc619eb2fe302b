//! Commute board - Entry Point

use anyhow::Result;
use clap::Parser;
use commute_app::render::render_board;
use commute_app::{AppConfig, Application};
use tracing::info;

/// Live TfL arrivals, line status and weather for one commute.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via COMMUTE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Aggregate once, print the board and exit
    #[arg(long)]
    once: bool,

    /// With --once, print the snapshot as JSON
    #[arg(long, requires = "once")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = AppConfig::resolve_path(args.config);
    let config = AppConfig::load(&config_path)?;

    commute_telemetry::init_logging(&config.telemetry.log_level)?;
    info!(
        config_path = %config_path,
        "Starting commute-board v{}",
        env!("CARGO_PKG_VERSION")
    );

    let app = Application::new(config)?;

    if args.once {
        let snapshot = app.run_once().await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            print!("{}", render_board(&snapshot));
        }
        return Ok(());
    }

    app.run().await?;

    Ok(())
}
