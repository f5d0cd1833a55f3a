//! Playback session actor.
//!
//! One spawned task owns all mutable session state (buffer controller and
//! telemetry sampler) and processes an ordered stream of events: fill
//! updates and shutdown from the command channel, sampler ticks from a
//! timer. Serializing both sources through a single loop gives the
//! single-writer semantics the bookkeeping relies on without any locking.

pub mod actor;
pub mod commands;
pub mod handle;

pub use actor::spawn_playback_session;
pub use commands::SessionCommand;
pub use handle::PlaybackSessionHandle;

/// Errors when talking to a playback session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session actor has already stopped
    #[error("playback session has shut down")]
    Shutdown,
}
