// src/logging.rs
// =============================================================================
// Log setup for the CLI.
//
// Everything goes to stderr through tracing-subscriber so that `--json`
// output on stdout stays machine-readable. RUST_LOG wins over -v flags.
// =============================================================================

use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, before any pipeline runs.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("catalog_scraper={},warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Formats a wall-clock duration as `HH:MM:SS.ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0).floor();
    let minutes = ((total - hours * 3600.0) / 60.0).floor();
    let seconds = total - hours * 3600.0 - minutes * 60.0;
    format!("{:02}:{:02}:{:05.2}", hours as u64, minutes as u64, seconds)
}
