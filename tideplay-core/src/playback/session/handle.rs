//! Handle for communicating with the playback session actor.

use tokio::sync::{mpsc, oneshot};

use super::SessionError;
use super::commands::SessionCommand;
use crate::playback::report::SessionReport;

/// Cloneable async API over the session command channel.
///
/// The pipeline's bus dispatcher pushes fill updates through here; whoever
/// owns the session lifetime calls `shutdown` on end-of-stream, pipeline
/// error or user exit.
#[derive(Clone)]
pub struct PlaybackSessionHandle {
    sender: mpsc::Sender<SessionCommand>,
}

impl PlaybackSessionHandle {
    /// Creates a handle with the given command sender.
    pub(super) fn new(sender: mpsc::Sender<SessionCommand>) -> Self {
        Self { sender }
    }

    /// Forwards a buffer fill percentage to the controller.
    ///
    /// # Errors
    ///
    /// - `SessionError::Shutdown` - Session actor has already stopped
    pub async fn fill_update(&self, percent: u8) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::FillUpdate { percent })
            .await
            .map_err(|_| SessionError::Shutdown)
    }

    /// Closes the session and returns the final report.
    ///
    /// Finalizes over whatever was collected so far; a session terminated
    /// mid-download or mid-stall still yields a valid partial report. No
    /// sampler tick runs after this returns.
    ///
    /// # Errors
    ///
    /// - `SessionError::Shutdown` - Session actor has already stopped
    pub async fn shutdown(&self) -> Result<SessionReport, SessionError> {
        let (responder, rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Shutdown { responder })
            .await
            .map_err(|_| SessionError::Shutdown)?;

        rx.await.map_err(|_| SessionError::Shutdown)
    }
}
