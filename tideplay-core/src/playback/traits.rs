//! Media pipeline collaborator interface.

use std::sync::Arc;

/// Control surface of the external decode/render pipeline.
///
/// The pipeline delivers buffer fill notifications to the session; the buffer
/// controller answers through these two commands. Both must be cheap and
/// non-blocking, as they are called from the session event loop.
pub trait MediaPipeline: Send + Sync {
    /// Halts playback while the buffer refills.
    fn pause(&self);

    /// Resumes playback from a full buffer.
    fn resume(&self);
}

impl<P: MediaPipeline + ?Sized> MediaPipeline for Arc<P> {
    fn pause(&self) {
        (**self).pause()
    }

    fn resume(&self) {
        (**self).resume()
    }
}
