//! Tracing setup for Tideplay.
//!
//! Dual output: console logs at a user-chosen level plus a full-debug log
//! file for the last run, so a quiet console never costs diagnostic detail
//! when a session misbehaves.

use std::fs::{File, create_dir_all};
use std::path::Path;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Initializes tracing with a console layer and a debug file layer.
///
/// The console layer respects `console_level` (or `RUST_LOG` when set); the
/// file layer always writes everything at trace level to
/// `<logs_dir>/tideplay-last-run.log`, overwriting the previous run.
///
/// # Errors
///
/// - `std::io::Error` - Logs directory cannot be created or the log file
///   cannot be opened for writing
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> std::io::Result<()> {
    let logs_path = logs_dir.unwrap_or_else(|| Path::new("logs"));
    create_dir_all(logs_path)?;

    let log_file_path = logs_path.join("tideplay-last-run.log");
    let log_file = File::create(&log_file_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_level.to_string()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        "Tracing initialized: console={}, debug_file={}",
        console_level,
        log_file_path.display()
    );

    Ok(())
}
