//! Playback session control and telemetry.
//!
//! The pieces here compose around one shared playback session: the buffer
//! controller reacts to pipeline fill events with pause/resume commands and
//! stall bookkeeping, the telemetry sampler polls the transfer engine on a
//! fixed period, and the session reporter turns everything collected into a
//! final statistical summary. The session actor serializes all of it behind
//! a single command stream.

pub mod buffer;
pub mod report;
pub mod session;
pub mod stats;
pub mod telemetry;
pub mod traits;

pub use buffer::{BufferController, BufferSession, PlaybackState};
pub use report::SessionReport;
pub use session::{PlaybackSessionHandle, SessionCommand, SessionError, spawn_playback_session};
pub use telemetry::{RateSamples, TelemetrySampler};
pub use traits::MediaPipeline;
