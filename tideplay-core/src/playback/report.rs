//! Final session report assembly and rendering.
//!
//! `finalize` runs once at session close over whatever was collected;
//! partial sessions produce partial but valid reports. Statistically
//! undefined values stay `None` in the typed report and render as the
//! sentinel `-1` in both output forms, never as a silent zero.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::buffer::BufferSession;
use super::stats;
use super::telemetry::RateSamples;

/// Sentinel rendered for statistically undefined fields.
const UNDEFINED: f64 = -1.0;

/// Immutable end-of-session summary.
///
/// `None` means the value is undefined for this session: the session never
/// reached playable state, a series had too few samples for the statistic,
/// or the download never completed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Seconds from session start to the first full buffer
    pub initial_wait_secs: Option<f64>,
    /// Mid-playback rebuffering stalls, including one still open at close
    pub interruption_count: u64,
    /// Mean of closed interruption durations in seconds
    pub interruption_mean_secs: Option<f64>,
    /// Sample standard deviation of closed interruption durations
    pub interruption_std_dev_secs: Option<f64>,
    /// Mean download rate in KiB/s over the downloading phase
    pub download_rate_mean_kib: Option<f64>,
    /// Sample standard deviation of the download rate series
    pub download_rate_std_dev_kib: Option<f64>,
    /// Mean upload rate in KiB/s over the whole session
    pub upload_rate_mean_kib: Option<f64>,
    /// Sample standard deviation of the upload rate series
    pub upload_rate_std_dev_kib: Option<f64>,
    /// Seconds from session start to download completion, if it completed
    pub download_time_secs: Option<f64>,
}

impl SessionReport {
    /// Computes the report from the session's stall bookkeeping and the
    /// sampler's rate series.
    ///
    /// An interruption still open at close counts toward the interruption
    /// count but is excluded from the mean and standard deviation, since it
    /// has no closed duration. A session that never finished its initial
    /// fill has an undefined initial wait.
    pub fn finalize(session: &BufferSession, samples: &RateSamples) -> Self {
        let closed = session.stall_intervals();
        let recorded = closed.len() + usize::from(session.has_open_stall());

        let initial_wait_secs = closed.first().map(Duration::as_secs_f64);
        let interruption_count = recorded.saturating_sub(1) as u64;

        let interruptions: Vec<f64> = closed
            .iter()
            .skip(1)
            .map(|stall| stall.as_secs_f64())
            .collect();

        Self {
            initial_wait_secs,
            interruption_count,
            interruption_mean_secs: stats::mean(&interruptions),
            interruption_std_dev_secs: stats::std_dev(&interruptions),
            download_rate_mean_kib: stats::mean(&samples.download_rates_kib),
            download_rate_std_dev_kib: stats::std_dev(&samples.download_rates_kib),
            upload_rate_mean_kib: stats::mean(&samples.upload_rates_kib),
            upload_rate_std_dev_kib: stats::std_dev(&samples.upload_rates_kib),
            download_time_secs: if samples.download_finished {
                samples.elapsed_download.map(|d| d.as_secs_f64())
            } else {
                None
            },
        }
    }

    /// Line-oriented `key value` pairs for offline aggregation across
    /// sessions. Undefined fields carry the `-1` sentinel.
    pub fn machine_lines(&self) -> Vec<String> {
        let field = |key: &str, value: Option<f64>| {
            format!("{key} {:.6}", value.unwrap_or(UNDEFINED))
        };

        vec![
            field("initial_wait", self.initial_wait_secs),
            format!("interruptions {}", self.interruption_count),
            field("interruption_mean", self.interruption_mean_secs),
            field("interruption_std_dev", self.interruption_std_dev_secs),
            field("download_rate_mean", self.download_rate_mean_kib),
            field("download_rate_std_dev", self.download_rate_std_dev_kib),
            field("upload_rate_mean", self.upload_rate_mean_kib),
            field("upload_rate_std_dev", self.upload_rate_std_dev_kib),
            field("download_time", self.download_time_secs),
        ]
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |value: Option<f64>| value.unwrap_or(UNDEFINED);

        writeln!(f, "--*-- Session statistics --*--")?;
        writeln!(f, "Time to start playback: {:.3} s", v(self.initial_wait_secs))?;
        writeln!(f, "Number of interruptions: {}", self.interruption_count)?;
        writeln!(
            f,
            "Interruption time - mean: {:.3} s",
            v(self.interruption_mean_secs)
        )?;
        writeln!(
            f,
            "Interruption time - standard deviation: {:.3} s",
            v(self.interruption_std_dev_secs)
        )?;
        writeln!(
            f,
            "Download rate - mean: {:.1} KiB/s",
            v(self.download_rate_mean_kib)
        )?;
        writeln!(
            f,
            "Download rate - standard deviation: {:.1} KiB/s",
            v(self.download_rate_std_dev_kib)
        )?;
        writeln!(
            f,
            "Upload rate - mean: {:.1} KiB/s",
            v(self.upload_rate_mean_kib)
        )?;
        writeln!(
            f,
            "Upload rate - standard deviation: {:.1} KiB/s",
            v(self.upload_rate_std_dev_kib)
        )?;
        write!(f, "Total download time: {:.3} s", v(self.download_time_secs))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Instant;

    use super::*;
    use crate::playback::buffer::BufferController;
    use crate::simulation::FakePipeline;

    fn controller() -> (BufferController<Arc<FakePipeline>>, Instant) {
        let start = Instant::now();
        let pipeline = Arc::new(FakePipeline::new());
        (BufferController::new(pipeline, start), start)
    }

    fn at(start: Instant, secs: u64) -> Instant {
        start + Duration::from_secs(secs)
    }

    #[test]
    fn test_session_without_any_interval_is_fully_undefined() {
        let session = BufferSession::new();
        let report = SessionReport::finalize(&session, &RateSamples::default());

        assert_eq!(report.initial_wait_secs, None);
        assert_eq!(report.interruption_count, 0);
        assert_eq!(report.interruption_mean_secs, None);
        assert_eq!(report.download_time_secs, None);
    }

    #[test]
    fn test_session_closed_during_initial_fill_has_undefined_wait() {
        // Only the initial stall exists and it never closed.
        let (controller, _) = controller();
        let report = SessionReport::finalize(controller.session(), &RateSamples::default());

        assert_eq!(report.initial_wait_secs, None);
        assert_eq!(report.interruption_count, 0);
        assert_eq!(report.interruption_mean_secs, None);
    }

    #[test]
    fn test_open_interruption_counts_but_contributes_no_duration() {
        let (mut controller, start) = controller();
        controller.fill_update(100, at(start, 5));
        controller.fill_update(20, at(start, 30));

        let report = SessionReport::finalize(controller.session(), &RateSamples::default());

        assert_eq!(report.initial_wait_secs, Some(5.0));
        assert_eq!(report.interruption_count, 1);
        assert_eq!(report.interruption_mean_secs, None);
        assert_eq!(report.interruption_std_dev_secs, None);
    }

    #[test]
    fn test_single_closed_interruption_has_mean_but_no_std_dev() {
        let (mut controller, start) = controller();
        controller.fill_update(100, at(start, 2));
        controller.fill_update(50, at(start, 10));
        controller.fill_update(100, at(start, 13));

        let report = SessionReport::finalize(controller.session(), &RateSamples::default());

        assert_eq!(report.interruption_count, 1);
        assert_eq!(report.interruption_mean_secs, Some(3.0));
        assert_eq!(report.interruption_std_dev_secs, None);
    }

    #[test]
    fn test_multiple_interruptions_have_mean_and_std_dev() {
        let (mut controller, start) = controller();
        controller.fill_update(100, at(start, 1));
        controller.fill_update(10, at(start, 5));
        controller.fill_update(100, at(start, 7)); // 2s
        controller.fill_update(40, at(start, 20));
        controller.fill_update(100, at(start, 24)); // 4s

        let report = SessionReport::finalize(controller.session(), &RateSamples::default());

        assert_eq!(report.initial_wait_secs, Some(1.0));
        assert_eq!(report.interruption_count, 2);
        assert_eq!(report.interruption_mean_secs, Some(3.0));
        // Sample stdev of [2, 4] is sqrt(2).
        let sd = report.interruption_std_dev_secs.unwrap();
        assert!((sd - 2.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_download_time_requires_finished_transfer() {
        let session = BufferSession::new();

        let unfinished = RateSamples {
            elapsed_download: Some(Duration::from_secs(90)),
            ..RateSamples::default()
        };
        let report = SessionReport::finalize(&session, &unfinished);
        assert_eq!(report.download_time_secs, None);

        let finished = RateSamples {
            download_finished: true,
            elapsed_download: Some(Duration::from_secs(90)),
            ..RateSamples::default()
        };
        let report = SessionReport::finalize(&session, &finished);
        assert_eq!(report.download_time_secs, Some(90.0));
    }

    #[test]
    fn test_rate_statistics_follow_sample_count_rules() {
        let session = BufferSession::new();
        let samples = RateSamples {
            download_rates_kib: vec![100.0],
            upload_rates_kib: vec![10.0, 30.0],
            ..RateSamples::default()
        };

        let report = SessionReport::finalize(&session, &samples);

        assert_eq!(report.download_rate_mean_kib, Some(100.0));
        assert_eq!(report.download_rate_std_dev_kib, None);
        assert_eq!(report.upload_rate_mean_kib, Some(20.0));
        assert!(report.upload_rate_std_dev_kib.is_some());
    }

    #[test]
    fn test_finalize_is_reproducible() {
        let (mut controller, start) = controller();
        controller.fill_update(100, at(start, 2));

        let samples = RateSamples {
            download_rates_kib: vec![10.0, 20.0],
            upload_rates_kib: vec![1.0],
            ..RateSamples::default()
        };

        let first = SessionReport::finalize(controller.session(), &samples);
        let second = SessionReport::finalize(controller.session(), &samples);
        assert_eq!(first, second);
    }

    #[test]
    fn test_machine_lines_render_sentinels() {
        let report = SessionReport::finalize(&BufferSession::new(), &RateSamples::default());
        let lines = report.machine_lines();

        assert!(lines.contains(&"initial_wait -1.000000".to_string()));
        assert!(lines.contains(&"interruptions 0".to_string()));
        assert!(lines.contains(&"download_time -1.000000".to_string()));
    }

    #[test]
    fn test_display_includes_sentinel_and_values() {
        let (mut controller, start) = controller();
        controller.fill_update(100, at(start, 4));

        let report = SessionReport::finalize(controller.session(), &RateSamples::default());
        let text = report.to_string();

        assert!(text.contains("Time to start playback: 4.000 s"));
        assert!(text.contains("Number of interruptions: 0"));
        assert!(text.contains("Total download time: -1.000 s"));
    }
}
