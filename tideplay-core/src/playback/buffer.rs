//! Buffer fill tracking and playback gating.
//!
//! Models playback as a two-sided state machine: the pipeline is either
//! running from a full buffer or paused while the buffer refills. Every
//! paused span is a stall interval; the first one is the unavoidable initial
//! fill wait, the rest are mid-playback interruptions. The intervals feed
//! the session report at close.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::traits::MediaPipeline;

/// Where playback currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Session object exists but playback gating has not started
    Initial,
    /// Pipeline paused, a stall interval is open
    Buffering,
    /// Pipeline running
    Playing,
}

/// Stall bookkeeping for one playback session.
///
/// `stall_intervals` holds only closed intervals, in chronological order;
/// an open stall lives in `pending_stall_start` until the buffer next
/// reaches 100%. A session torn down mid-stall therefore never contributes
/// a bogus trailing duration.
#[derive(Debug)]
pub struct BufferSession {
    state: PlaybackState,
    stall_intervals: Vec<Duration>,
    pending_stall_start: Option<Instant>,
}

impl BufferSession {
    /// Creates a session that has not begun buffering yet.
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Initial,
            stall_intervals: Vec::new(),
            pending_stall_start: None,
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Closed stall intervals in chronological order.
    ///
    /// The first element, when present, is the initial fill wait.
    pub fn stall_intervals(&self) -> &[Duration] {
        &self.stall_intervals
    }

    /// Whether a stall is currently open.
    pub fn has_open_stall(&self) -> bool {
        self.pending_stall_start.is_some()
    }

    /// Opens a stall interval at `now` and enters `Buffering`.
    fn begin_stall(&mut self, now: Instant) {
        self.state = PlaybackState::Buffering;
        self.pending_stall_start = Some(now);
    }

    /// Closes the open stall at `now`, records its duration and enters
    /// `Playing`. Returns `None` if no stall was open.
    fn end_stall(&mut self, now: Instant) -> Option<Duration> {
        let opened = self.pending_stall_start.take()?;
        let stall = now.duration_since(opened);
        self.stall_intervals.push(stall);
        self.state = PlaybackState::Playing;
        Some(stall)
    }
}

impl Default for BufferSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Reacts to pipeline fill notifications with pause/resume commands.
///
/// Construction immediately pauses the pipeline and opens the initial fill
/// wait; playback only starts once the pipeline first reports a full buffer.
/// Each call is a synchronous O(1) reaction with no I/O beyond the pipeline
/// command itself.
pub struct BufferController<P> {
    session: BufferSession,
    pipeline: P,
}

impl<P: MediaPipeline> BufferController<P> {
    /// Creates the controller and starts the initial fill wait.
    pub fn new(pipeline: P, now: Instant) -> Self {
        let mut session = BufferSession::new();
        session.begin_stall(now);
        pipeline.pause();
        info!("buffering before playback start");

        Self { session, pipeline }
    }

    /// Handles a buffer occupancy report from the pipeline.
    ///
    /// 100% while buffering closes the stall and resumes playback; anything
    /// below 100% while playing pauses and opens a new stall. Repeated
    /// reports on the same side of the threshold are no-ops.
    pub fn fill_update(&mut self, percent: u8, now: Instant) {
        let percent = percent.min(100);

        match self.session.state {
            PlaybackState::Initial | PlaybackState::Buffering if percent == 100 => {
                if let Some(stall) = self.session.end_stall(now) {
                    self.pipeline.resume();
                    info!(stall_secs = stall.as_secs_f64(), "buffer full, playback running");
                }
            }
            PlaybackState::Playing if percent < 100 => {
                self.session.begin_stall(now);
                self.pipeline.pause();
                info!(percent, "buffer drained, playback paused");
            }
            _ => {
                debug!(percent, state = ?self.session.state, "fill update without transition");
            }
        }
    }

    /// Read access to the stall bookkeeping.
    pub fn session(&self) -> &BufferSession {
        &self.session
    }
}
