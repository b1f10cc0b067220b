//! Persona Dash - Behavioral Personality Dashboard
//!
//! Loads a personality survey CSV, cleans and aggregates it, and shows a
//! nine-panel dashboard (three pies, five stacked bars, a caption) comparing
//! behavioral traits of introverts and extroverts.
//!
//! Exit codes:
//!   0 - Dashboard shown and window closed
//!   1 - Any load, aggregation, render or display error

use anyhow::{Context, Result};
use persona_dash::charts::DashboardRenderer;
use persona_dash::cli::Args;
use persona_dash::config::Config;
use persona_dash::data::{DataLoader, DataProcessor};
use persona_dash::gui;
use persona_dash::stats::Aggregator;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    let args = Args::parse_args();
    init_logging(&args);

    info!("Persona Dash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Dashboard failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize logging. `RUST_LOG` takes precedence over --verbose / --quiet.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, clean, aggregate, render and present the dashboard.
fn run(args: Args) -> Result<()> {
    let config = Config::resolve(&args).context("Invalid configuration")?;
    let palette = config.palette()?;

    let mut loader = DataLoader::new();
    loader
        .load_csv(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    debug!(
        "Read {} rows from {:?}",
        loader.get_row_count(),
        loader.get_file_path()
    );
    let raw = loader.take_dataframe()?;

    let cleaned = DataProcessor::clean(raw).context("Failed to clean data")?;
    let dashboard = Aggregator::build_dashboard(&cleaned).context("Failed to aggregate data")?;

    let image = DashboardRenderer::render(
        &dashboard,
        &palette,
        config.canvas.width,
        config.canvas.height,
    )
    .context("Failed to render dashboard")?;

    gui::show(image)?;
    Ok(())
}
