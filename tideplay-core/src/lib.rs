//! Tideplay Core - Playback control for media streamed from an in-progress transfer
//!
//! This crate provides the building blocks for playing back audio/video while
//! the underlying peer-to-peer transfer is still running: a buffer controller
//! that pauses and resumes the media pipeline on fill events, a telemetry
//! sampler that polls transfer-engine counters, and a session reporter that
//! aggregates everything into a final statistical summary.

pub mod config;
pub mod playback;
pub mod simulation;
pub mod tracing_setup;
pub mod transfer;

// Re-export main types for convenient access
pub use config::PlayerConfig;
pub use playback::{
    BufferController, BufferSession, MediaPipeline, PlaybackSessionHandle, PlaybackState,
    RateSamples, SessionError, SessionReport, TelemetrySampler, spawn_playback_session,
};
pub use transfer::{PieceSelection, TransferEngine, TransferError, TransferStatus};

/// Core errors that can bubble up from any Tideplay subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TideplayError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TideplayError>;
