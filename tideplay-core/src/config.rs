//! Centralized configuration for Tideplay.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::net::SocketAddr;
use std::time::Duration;

use crate::transfer::PieceSelection;

/// Central configuration for a playback session and its collaborators.
///
/// Groups related settings into logical sections with sensible defaults.
#[derive(Debug, Clone, Default)]
pub struct PlayerConfig {
    pub sampler: SamplerConfig,
    pub transfer: TransferConfig,
}

/// Telemetry sampler configuration.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Period between transfer-status polls
    pub period: Duration,
    /// Capacity of the session command channel
    pub command_capacity: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            command_capacity: 64,
        }
    }
}

/// Settings handed to the transfer-engine collaborator at session start.
///
/// The engine itself lives outside this crate; these only record which
/// piece-selection strategy was requested and an optional seed known in
/// advance of tracker discovery.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Piece-selection strategy the engine should use
    pub piece_selection: PieceSelection,
    /// Address of a previously known seed, if any
    pub known_seed: Option<SocketAddr>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            piece_selection: PieceSelection::RarestFirst,
            known_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sampler_period_is_one_second() {
        let config = PlayerConfig::default();
        assert_eq!(config.sampler.period, Duration::from_secs(1));
    }

    #[test]
    fn test_default_piece_selection_is_rarest_first() {
        let config = PlayerConfig::default();
        assert_eq!(config.transfer.piece_selection, PieceSelection::RarestFirst);
        assert!(config.transfer.known_seed.is_none());
    }
}
