//! RevPulse — multi-touch attribution and cohort analytics engine.
//!
//! CLI entry point: loads a JSON snapshot of touchpoints, revenue events,
//! and clients, runs the analytics pipeline, and prints the overview.

use clap::Parser;
use revpulse_core::config::AppConfig;
use revpulse_core::error::RevPulseError;
use revpulse_reporting::pipeline::{self, AnalyticsOptions, AnalyticsSnapshot};
use revpulse_reporting::window::TimeWindow;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "revpulse")]
#[command(about = "Multi-touch attribution and cohort analytics engine")]
#[command(version)]
struct Cli {
    /// Path to the JSON snapshot of touchpoints, revenue events, and clients
    #[arg(long, env = "REVPULSE__SNAPSHOT_PATH")]
    snapshot: Option<String>,

    /// Attribution model key (overrides config)
    #[arg(long, env = "REVPULSE__MODEL")]
    model: Option<String>,

    /// Trailing window in days: 30, 90, 180, or 365 (overrides config)
    #[arg(long, env = "REVPULSE__WINDOW_DAYS")]
    window_days: Option<u32>,

    /// Number of touchpoints in the ranking (overrides config)
    #[arg(long, env = "REVPULSE__TOP_N")]
    top: Option<usize>,

    /// Cohort tracking horizon in months (overrides config)
    #[arg(long, env = "REVPULSE__MONTHS_TO_TRACK")]
    months: Option<usize>,

    /// Print the six-model comparison instead of the full overview
    #[arg(long, default_value_t = false)]
    compare_models: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "revpulse=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("RevPulse starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(days) = cli.window_days {
        config.window_days = days;
    }
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    if let Some(months) = cli.months {
        config.months_to_track = months;
    }
    if let Some(path) = cli.snapshot {
        config.snapshot_path = Some(path);
    }

    info!(
        model = %config.model,
        window_days = config.window_days,
        top_n = config.top_n,
        months_to_track = config.months_to_track,
        "Configuration loaded"
    );

    let window = TimeWindow::try_from(config.window_days)?;

    let snapshot_path = config.snapshot_path.ok_or_else(|| {
        RevPulseError::Snapshot(
            "no snapshot path given (use --snapshot or REVPULSE__SNAPSHOT_PATH)".to_string(),
        )
    })?;

    let raw = std::fs::read_to_string(&snapshot_path)?;
    let snapshot: AnalyticsSnapshot = serde_json::from_str(&raw)?;

    info!(
        snapshot = %snapshot_path,
        touchpoints = snapshot.touchpoints.len(),
        revenue_events = snapshot.revenue_events.len(),
        clients = snapshot.clients.len(),
        "Snapshot loaded"
    );

    if cli.compare_models {
        let comparison = pipeline::compare_models(&snapshot, window);
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    let options = AnalyticsOptions {
        model_key: config.model,
        window,
        top_n: config.top_n,
        months_to_track: config.months_to_track,
    };

    let overview = pipeline::run(&snapshot, &options);
    println!("{}", serde_json::to_string_pretty(&overview)?);

    Ok(())
}
