//! Periodic sampling of transfer-engine counters.
//!
//! Once per period the session actor hands the sampler the current instant;
//! the sampler polls the engine, records rate samples and logs the peer and
//! announce diagnostics. Download-rate samples are only kept while the
//! transfer is incomplete; upload-rate samples run for the whole session
//! because seeding continues after the download finishes.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::transfer::TransferEngine;

const KIB: f64 = 1024.0;

/// Everything the sampler has collected so far.
///
/// Plain data with no behavior; the session reporter reads it at finalize
/// time and nothing else ever does.
#[derive(Debug, Default)]
pub struct RateSamples {
    /// Download rate observations in KiB/s, one per pre-completion tick
    pub download_rates_kib: Vec<f64>,
    /// Upload rate observations in KiB/s, one per tick
    pub upload_rates_kib: Vec<f64>,
    /// Latched on the first tick that observes a complete transfer
    pub download_finished: bool,
    /// Session-start-to-completion time, set together with the latch
    pub elapsed_download: Option<Duration>,
}

/// Polls the transfer engine on a fixed period and accumulates rate series.
pub struct TelemetrySampler<E> {
    engine: E,
    samples: RateSamples,
    session_start: Instant,
}

impl<E: TransferEngine> TelemetrySampler<E> {
    /// Creates a sampler; `now` marks session start for the elapsed
    /// download-time measurement.
    pub fn new(engine: E, now: Instant) -> Self {
        Self {
            engine,
            samples: RateSamples::default(),
            session_start: now,
        }
    }

    /// Takes one sample at `now`.
    ///
    /// An engine read failure skips the cycle; sampling gaps are tolerated
    /// and the next tick proceeds normally.
    pub async fn tick(&mut self, now: Instant) {
        let status = match self.engine.status().await {
            Ok(status) => status,
            Err(error) => {
                debug!(%error, "transfer status unavailable, skipping sample");
                return;
            }
        };

        let download_kib = status.download_rate_bytes as f64 / KIB;
        let upload_kib = status.upload_rate_bytes as f64 / KIB;

        if !status.is_complete() {
            self.samples.download_rates_kib.push(download_kib);
            debug!(
                download_kib,
                upload_kib,
                progress_percent = status.progress_percent(),
                peers = status.num_peers,
                seeds = status.num_seeds,
                connected_peers = status.num_connected_peers,
                connected_seeds = status.num_connected_seeds,
                upload_slots = status.num_upload_slots,
                distributed_copies = status.distributed_copies,
                next_announce_secs = status.seconds_to_next_announce,
                "transfer status"
            );
        } else if !self.samples.download_finished {
            let elapsed = now.duration_since(self.session_start);
            self.samples.download_finished = true;
            self.samples.elapsed_download = Some(elapsed);
            info!(elapsed_secs = elapsed.as_secs_f64(), "download finished, still seeding");
        }

        self.samples.upload_rates_kib.push(upload_kib);
    }

    /// Read access to the collected series.
    pub fn samples(&self) -> &RateSamples {
        &self.samples
    }
}
