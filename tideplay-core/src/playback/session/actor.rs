//! Actor implementation for the playback session.

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::commands::SessionCommand;
use super::handle::PlaybackSessionHandle;
use crate::config::PlayerConfig;
use crate::playback::buffer::BufferController;
use crate::playback::report::SessionReport;
use crate::playback::telemetry::TelemetrySampler;
use crate::playback::traits::MediaPipeline;
use crate::transfer::TransferEngine;

/// Spawns the playback session actor and returns its handle.
///
/// The controller immediately pauses the pipeline for the initial fill wait;
/// telemetry polling starts one sampler period later. Commands and ticks are
/// processed one at a time on the spawned task, so fill events and telemetry
/// never race over session state.
pub fn spawn_playback_session<P, E>(
    config: PlayerConfig,
    pipeline: P,
    engine: E,
) -> PlaybackSessionHandle
where
    P: MediaPipeline + Send + 'static,
    E: TransferEngine + Send + 'static,
{
    let (sender, receiver) = mpsc::channel(config.sampler.command_capacity);

    tokio::spawn(async move {
        run_session_loop(config, pipeline, engine, receiver).await;
    });

    PlaybackSessionHandle::new(sender)
}

/// Runs the session event loop until shutdown or all handles are dropped.
async fn run_session_loop<P, E>(
    config: PlayerConfig,
    pipeline: P,
    engine: E,
    mut receiver: mpsc::Receiver<SessionCommand>,
) where
    P: MediaPipeline + Send + 'static,
    E: TransferEngine + Send + 'static,
{
    let session_start = Instant::now();
    let mut controller = BufferController::new(pipeline, session_start);
    let mut sampler = TelemetrySampler::new(engine, session_start);

    let period = config.sampler.period;
    let mut status_interval = tokio::time::interval_at((session_start + period).into(), period);
    // Gaps are tolerated; do not burst-replay ticks missed under load.
    status_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!("playback session started");

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(SessionCommand::FillUpdate { percent }) => {
                    controller.fill_update(percent, Instant::now());
                }
                Some(SessionCommand::Shutdown { responder }) => {
                    let report =
                        SessionReport::finalize(controller.session(), sampler.samples());
                    let _ = responder.send(report);
                    break;
                }
                None => {
                    debug!("all session handles dropped, stopping without report");
                    break;
                }
            },
            _ = status_interval.tick() => {
                sampler.tick(Instant::now()).await;
            }
        }
    }

    debug!("playback session stopped");
}
