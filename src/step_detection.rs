//! Step timing and cadence estimation.
//!
//! Footstrikes are inferred from peaks in the acceleration magnitude of the
//! rolling sample window. Each accepted step produces an inter-step interval;
//! cadence is 60 over the mean of the recent plausible intervals.
//!
//! Two trigger policies are supported (see [`StepTrigger`]). The default
//! re-triggers whenever any peak is present in the window, which matches the
//! behaviour hosts were tuned against. `NewPeakOnly` consumes each peak once.

use tracing::debug;

use crate::buffer::BoundedHistory;
use crate::config::{PeakDetectorConfig, StepConfig, StepTrigger};
use crate::signal::detect_peaks;
use crate::types::Sample;

/// Tracks step timestamps and the recent interval history.
#[derive(Debug, Clone)]
pub struct StepTracker {
    peaks: PeakDetectorConfig,
    steps: StepConfig,
    min_samples: usize,

    intervals: BoundedHistory<f64>,
    last_step_ms: Option<u64>,
    // Scratch buffer reused across calls
    magnitudes: Vec<f64>,
    total_steps: u64,
}

impl StepTracker {
    /// Create a tracker.
    ///
    /// `min_samples` is the window length below which no detection runs.
    pub fn new(
        peaks: PeakDetectorConfig,
        steps: StepConfig,
        interval_capacity: usize,
        min_samples: usize,
    ) -> Self {
        Self {
            peaks,
            steps,
            min_samples,
            intervals: BoundedHistory::new(interval_capacity),
            last_step_ms: None,
            magnitudes: Vec::new(),
            total_steps: 0,
        }
    }

    /// Run detection over the current window and return the raw cadence in
    /// steps per minute.
    ///
    /// `now_ms` is the timestamp of the sample that was just appended.
    pub fn update(&mut self, window: &BoundedHistory<Sample>, now_ms: u64) -> f64 {
        if window.len() < self.min_samples {
            return 0.0;
        }

        self.magnitudes.clear();
        self.magnitudes.extend(window.iter().map(|s| s.magnitude));
        let peaks = detect_peaks(
            &self.magnitudes,
            self.peaks.threshold,
            self.peaks.min_distance,
        );

        if let Some(&newest) = peaks.last() {
            match self.steps.trigger {
                StepTrigger::AnyPeakInWindow => self.register_step(now_ms),
                StepTrigger::NewPeakOnly => {
                    let peak_ms = window
                        .iter()
                        .nth(newest)
                        .map_or(now_ms, |sample| sample.timestamp_ms);
                    let is_new = self.last_step_ms.map_or(true, |last| peak_ms > last);
                    if is_new {
                        self.register_step(peak_ms);
                    }
                }
            }
        }

        self.cadence()
    }

    /// Raw cadence from the interval history; 0 when empty.
    pub fn cadence(&self) -> f64 {
        match self.intervals.mean() {
            Some(mean) if mean > 0.0 => 60.0 / mean,
            _ => 0.0,
        }
    }

    /// Timestamp of the most recent step, if any.
    pub fn last_step_ms(&self) -> Option<u64> {
        self.last_step_ms
    }

    /// Recent accepted intervals in seconds, oldest first.
    pub fn intervals(&self) -> &BoundedHistory<f64> {
        &self.intervals
    }

    /// Number of step triggers seen so far.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    // =========================================================================
    // PRIVATE METHODS
    // =========================================================================

    fn register_step(&mut self, step_ms: u64) {
        if let Some(last) = self.last_step_ms {
            let interval_s = step_ms.saturating_sub(last) as f64 / 1000.0;
            if interval_s >= self.steps.min_interval_s && interval_s <= self.steps.max_interval_s {
                self.intervals.push(interval_s);
                debug!(interval_s, step_ms, "step interval accepted");
            } else {
                debug!(interval_s, step_ms, "step interval outside plausible range");
            }
        }
        self.last_step_ms = Some(step_ms);
        self.total_steps += 1;
    }
}

// ============================================================================
// TESTS
// ============================================================================
