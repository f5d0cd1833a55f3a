//! Transfer-engine collaborator interface.
//!
//! The peer-to-peer engine that performs piece selection, peer discovery and
//! I/O lives outside this crate. Tideplay consumes it through a small polled
//! snapshot interface: the telemetry sampler asks for a [`TransferStatus`]
//! once per period and never pushes anything back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the transfer-engine collaborator.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Engine could not be queried this cycle
    #[error("transfer engine unavailable: {reason}")]
    Unavailable {
        /// Reason the engine gave, if any
        reason: String,
    },

    /// Engine has shut down and will not answer again
    #[error("transfer engine shut down")]
    Shutdown,
}

/// Piece-selection strategy requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceSelection {
    /// Standard rarest-first selection
    RarestFirst,
    /// In-order selection for straight-through playback
    Sequential,
    /// Deadline-driven selection keyed to playback position
    Deadline,
}

/// Snapshot of transfer counters at one poll instant.
///
/// Rates are raw bytes per second; the sampler converts to KiB/s when
/// recording. `progress` is a fraction in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferStatus {
    pub download_rate_bytes: u64,
    pub upload_rate_bytes: u64,
    pub progress: f64,
    pub num_peers: u32,
    pub num_seeds: u32,
    pub num_connected_peers: u32,
    pub num_connected_seeds: u32,
    pub num_upload_slots: u32,
    pub distributed_copies: u32,
    pub seconds_to_next_announce: u64,
}

impl TransferStatus {
    /// Download progress as a 0-100 percentage.
    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }

    /// Whether every piece has been downloaded.
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Read-only view of a running transfer.
///
/// Implementations must tolerate being polled after completion; upload
/// counters stay live while the session seeds.
#[async_trait]
pub trait TransferEngine: Send + Sync {
    /// Returns a snapshot of the current transfer counters.
    ///
    /// # Errors
    ///
    /// - `TransferError::Unavailable` - Engine could not be queried this cycle
    /// - `TransferError::Shutdown` - Engine is gone for good
    async fn status(&self) -> Result<TransferStatus, TransferError>;
}

#[async_trait]
impl<E: TransferEngine + ?Sized> TransferEngine for std::sync::Arc<E> {
    async fn status(&self) -> Result<TransferStatus, TransferError> {
        (**self).status().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_with_progress(progress: f64) -> TransferStatus {
        TransferStatus {
            download_rate_bytes: 0,
            upload_rate_bytes: 0,
            progress,
            num_peers: 0,
            num_seeds: 0,
            num_connected_peers: 0,
            num_connected_seeds: 0,
            num_upload_slots: 0,
            distributed_copies: 0,
            seconds_to_next_announce: 0,
        }
    }

    #[test]
    fn test_progress_percent_scales_fraction() {
        assert_eq!(status_with_progress(0.25).progress_percent(), 25.0);
        assert_eq!(status_with_progress(1.0).progress_percent(), 100.0);
    }

    #[test]
    fn test_is_complete_only_at_full_progress() {
        assert!(!status_with_progress(0.999).is_complete());
        assert!(status_with_progress(1.0).is_complete());
    }
}
