//! Tideplay CLI - plays a torrent-backed media session and reports on it.
//!
//! Drives a playback session against the built-in simulated transfer engine:
//! buffer fill events pause and resume the pipeline while the download runs,
//! and session statistics are printed at exit. Ctrl-C ends the session early
//! with a partial report.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tideplay_core::config::{PlayerConfig, TransferConfig};
use tideplay_core::playback::{MediaPipeline, spawn_playback_session};
use tideplay_core::simulation::{FakePipeline, SimulatedTransfer};
use tideplay_core::transfer::PieceSelection;
use tideplay_core::tracing_setup::init_tracing;
use tracing::{Level, info};

/// Grace period of seeding after the download completes.
const SEED_GRACE: Duration = Duration::from_secs(5);

/// How often the demo pipeline reports its buffer fill.
const FILL_REPORT_PERIOD: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "tideplay")]
#[command(about = "BitTorrent media playback client")]
struct Cli {
    /// Torrent file to open
    torrent_path: PathBuf,

    /// Produce no audio/video output
    #[arg(short = 'f', long)]
    fake_sink: bool,

    /// Download pieces sequentially instead of rarest-first
    #[arg(long = "seq")]
    sequential: bool,

    /// Address of a previously known seed
    #[arg(long)]
    seed: Option<SocketAddr>,

    /// Simulated download duration in seconds
    #[arg(long, default_value_t = 20)]
    duration: u64,

    /// Print the final report as JSON instead of key/value lines
    #[arg(long)]
    json: bool,

    /// Console log level
    #[arg(long, default_value = "info")]
    log_level: Level,
}

/// Pipeline stand-in that narrates state changes to the console log.
struct ConsolePipeline;

impl MediaPipeline for ConsolePipeline {
    fn pause(&self) {
        info!("pipeline paused");
    }

    fn resume(&self) {
        info!("pipeline playing");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level, None).context("failed to initialize tracing")?;

    info!(torrent = %cli.torrent_path.display(), "download started");

    let config = PlayerConfig {
        transfer: TransferConfig {
            piece_selection: if cli.sequential {
                PieceSelection::Sequential
            } else {
                PieceSelection::RarestFirst
            },
            known_seed: cli.seed,
        },
        ..PlayerConfig::default()
    };

    let start = Instant::now();
    let transfer = Arc::new(SimulatedTransfer::new(
        &config.transfer,
        Duration::from_secs(cli.duration),
        start,
    ));

    let pipeline: Arc<dyn MediaPipeline> = if cli.fake_sink {
        Arc::new(FakePipeline::new())
    } else {
        Arc::new(ConsolePipeline)
    };

    let handle = spawn_playback_session(config, pipeline, Arc::clone(&transfer));

    // Feed fill events until playback finishes or the user interrupts.
    let mut fill_interval = tokio::time::interval(FILL_REPORT_PERIOD);
    let session_end = start + Duration::from_secs(cli.duration) + SEED_GRACE;

    loop {
        tokio::select! {
            _ = fill_interval.tick() => {
                let now = Instant::now();
                if now >= session_end {
                    info!("playback finished");
                    break;
                }
                handle.fill_update(transfer.buffer_fill_at(now)).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping");
                break;
            }
        }
    }

    let report = handle.shutdown().await?;

    println!("{report}");
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in report.machine_lines() {
            println!("{line}");
        }
    }

    Ok(())
}
