//! Deterministic collaborator implementations for tests and the demo binary.
//!
//! `SimulatedTransfer` stands in for the external peer-to-peer engine with a
//! reproducible download ramp; `FakePipeline` stands in for the decode/render
//! pipeline and records the commands it receives. Neither touches the
//! network or any media stack.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::config::TransferConfig;
use crate::playback::traits::MediaPipeline;
use crate::transfer::{TransferEngine, TransferError, TransferStatus};

/// Announce period the simulated tracker pretends to use.
const ANNOUNCE_PERIOD_SECS: u64 = 1800;

/// Pipeline command observed by [`FakePipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineCommand {
    Pause,
    Resume,
}

/// Media pipeline that produces no output and records every command.
#[derive(Debug, Default)]
pub struct FakePipeline {
    commands: Mutex<Vec<PipelineCommand>>,
}

impl FakePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, in order.
    pub fn commands(&self) -> Vec<PipelineCommand> {
        self.commands.lock().expect("pipeline command log poisoned").clone()
    }

    fn record(&self, command: PipelineCommand) {
        self.commands
            .lock()
            .expect("pipeline command log poisoned")
            .push(command);
    }
}

impl MediaPipeline for FakePipeline {
    fn pause(&self) {
        self.record(PipelineCommand::Pause);
    }

    fn resume(&self) {
        self.record(PipelineCommand::Resume);
    }
}

/// Transfer engine that completes a pretend download on a fixed schedule.
///
/// Progress climbs linearly from session start to `download_duration`, then
/// the engine keeps seeding at a constant upload rate. Status is a pure
/// function of elapsed time, so runs are reproducible.
pub struct SimulatedTransfer {
    start: Instant,
    download_duration: Duration,
    download_rate_kib: u64,
    upload_rate_kib: u64,
}

impl SimulatedTransfer {
    /// Creates a simulated transfer starting at `now`.
    pub fn new(config: &TransferConfig, download_duration: Duration, now: Instant) -> Self {
        debug!(
            piece_selection = ?config.piece_selection,
            known_seed = ?config.known_seed,
            "starting simulated transfer"
        );

        Self {
            start: now,
            download_duration,
            download_rate_kib: 512,
            upload_rate_kib: 96,
        }
    }

    /// Status snapshot as of `now`.
    pub fn status_at(&self, now: Instant) -> TransferStatus {
        let elapsed = now.duration_since(self.start);
        let progress = if self.download_duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.download_duration.as_secs_f64()).min(1.0)
        };
        let downloading = progress < 1.0;

        TransferStatus {
            download_rate_bytes: if downloading {
                self.download_rate_kib * 1024
            } else {
                0
            },
            upload_rate_bytes: self.upload_rate_kib * 1024,
            progress,
            num_peers: 12,
            num_seeds: 3,
            num_connected_peers: if downloading { 8 } else { 2 },
            num_connected_seeds: if downloading { 3 } else { 0 },
            num_upload_slots: 4,
            distributed_copies: 1 + progress as u32,
            seconds_to_next_announce: ANNOUNCE_PERIOD_SECS
                - (elapsed.as_secs() % ANNOUNCE_PERIOD_SECS),
        }
    }

    /// Buffer occupancy the pretend pipeline would report at `now`.
    ///
    /// Fills during the first 5% of the download, dips once at the halfway
    /// point to force a rebuffer, and stays full otherwise.
    pub fn buffer_fill_at(&self, now: Instant) -> u8 {
        if self.download_duration.is_zero() {
            return 100;
        }
        let frac = now.duration_since(self.start).as_secs_f64()
            / self.download_duration.as_secs_f64();

        let fill = if frac < 0.05 {
            frac / 0.05 * 100.0
        } else if (0.50..0.55).contains(&frac) {
            40.0 + (frac - 0.50) / 0.05 * 60.0
        } else {
            100.0
        };

        fill.clamp(0.0, 100.0) as u8
    }
}

#[async_trait]
impl TransferEngine for SimulatedTransfer {
    async fn status(&self) -> Result<TransferStatus, TransferError> {
        Ok(self.status_at(Instant::now()))
    }
}
