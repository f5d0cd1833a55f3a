//! Command protocol for the playback session actor.

use tokio::sync::oneshot;

use crate::playback::report::SessionReport;

/// Commands processed sequentially by the session actor.
#[derive(Debug)]
pub enum SessionCommand {
    /// Buffer occupancy report from the pipeline, 0-100
    FillUpdate { percent: u8 },

    /// Close the session; the final report goes back on the responder
    Shutdown {
        responder: oneshot::Sender<SessionReport>,
    },
}
