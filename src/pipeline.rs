//! Streaming gait metrics pipeline.
//!
//! This module owns the only stateful object in the engine. The host calls
//! [`StreamProcessor::ingest`] once per accelerometer callback and renders
//! whatever snapshot comes back.
//!
//! # Architecture
//!
//! Each ingest call runs the same fixed sequence:
//! 1. **Sample derivation**: magnitude minus gravity, vertical component
//! 2. **Step tracking**: peak detection over the window, interval history
//! 3. **Raw estimation**: cadence, vertical oscillation, ground contact time
//! 4. **Smoothing**: exponential blend against the previous smoothed state
//! 5. **Snapshot**: rounding and pace formatting
//!
//! # Performance
//! - Bounded buffers (20 samples, 10 intervals), no growth after warm-up
//! - Synchronous and non-blocking; worst case is linear in the window size
//! - One processor per session; no shared or static state

use tracing::{info, trace, warn};

use crate::buffer::BoundedHistory;
use crate::config::{GaitConfig, InvalidSamplePolicy};
use crate::error::{GaitError, Result};
use crate::estimators::{ground_contact_time, pace_from_cadence, vertical_oscillation};
use crate::signal::smooth_value;
use crate::step_detection::StepTracker;
use crate::types::{
    AccelReading, MetricsSnapshot, Pace, Sample, SensorAvailability, SmoothedMetrics,
};

/// Per-session streaming processor.
#[derive(Debug, Clone)]
pub struct StreamProcessor {
    config: GaitConfig,
    samples: BoundedHistory<Sample>,
    steps: StepTracker,
    smoothed: SmoothedMetrics,
    last_valid: Option<AccelReading>,
    rejected_samples: u64,
}

impl StreamProcessor {
    /// Creates a processor with the default calibration.
    pub fn new() -> Self {
        Self::build(GaitConfig::default())
    }

    /// Creates a processor with a validated custom configuration.
    pub fn with_config(config: GaitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GaitConfig) -> Self {
        let steps = StepTracker::new(
            config.peaks.clone(),
            config.steps.clone(),
            config.buffers.interval_capacity,
            config.buffers.min_samples_for_cadence,
        );
        Self {
            samples: BoundedHistory::new(config.buffers.sample_capacity),
            steps,
            smoothed: SmoothedMetrics::default(),
            last_valid: None,
            rejected_samples: 0,
            config,
        }
    }

    /// Processes one accelerometer reading (g-units) and returns the
    /// updated snapshot.
    ///
    /// Fails with [`GaitError::InvalidSample`] when a component is not
    /// finite and the configured policy cannot substitute a reading. A
    /// failed call leaves every piece of state untouched.
    pub fn ingest(&mut self, timestamp_ms: u64, x: f64, y: f64, z: f64) -> Result<MetricsSnapshot> {
        let reading = self.accept_reading(timestamp_ms, AccelReading::new(x, y, z))?;

        self.samples.push(Sample::from_reading(timestamp_ms, reading));

        let raw_cadence = self.steps.update(&self.samples, timestamp_ms);
        let raw_oscillation = if self.samples.len() < self.config.buffers.min_samples_for_oscillation {
            0.0
        } else {
            vertical_oscillation(
                self.samples.iter().map(|s| s.vertical_component),
                &self.config.oscillation,
            )
        };
        let raw_gct = ground_contact_time(raw_cadence, &self.config.contact_time);

        let factors = &self.config.smoothing;
        self.smoothed.cadence = smooth_value(raw_cadence, self.smoothed.cadence, factors.cadence);
        self.smoothed.vertical_oscillation = smooth_value(
            raw_oscillation,
            self.smoothed.vertical_oscillation,
            factors.vertical_oscillation,
        );
        self.smoothed.ground_contact_time = smooth_value(
            raw_gct,
            self.smoothed.ground_contact_time,
            factors.ground_contact_time,
        );

        trace!(
            timestamp_ms,
            raw_cadence,
            raw_oscillation,
            raw_gct,
            cadence = self.smoothed.cadence,
            "ingested sample"
        );

        Ok(self.snapshot())
    }

    /// Accepts a gyroscope reading. Currently unused by every estimator.
    pub fn ingest_orientation(&mut self, _x: f64, _y: f64, _z: f64) {}

    /// Display view of the current smoothed state.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let pace = if self.smoothed.cadence == 0.0 {
            Pace::ZERO
        } else {
            pace_from_cadence(self.smoothed.cadence, self.config.pace.stride_length_m)
        };
        MetricsSnapshot::from_smoothed(&self.smoothed, pace)
    }

    /// Smoothed state carried across calls.
    pub fn smoothed(&self) -> &SmoothedMetrics {
        &self.smoothed
    }

    /// Number of samples currently held in the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Recent plausible step intervals in seconds, oldest first.
    pub fn step_intervals(&self) -> Vec<f64> {
        self.steps.intervals().iter().copied().collect()
    }

    /// Timestamp of the most recently registered step.
    pub fn last_step_ms(&self) -> Option<u64> {
        self.steps.last_step_ms()
    }

    /// Number of step triggers seen since construction.
    pub fn step_count(&self) -> u64 {
        self.steps.total_steps()
    }

    /// Number of readings rejected as non-finite.
    pub fn rejected_samples(&self) -> u64 {
        self.rejected_samples
    }

    pub fn config(&self) -> &GaitConfig {
        &self.config
    }

    fn accept_reading(&mut self, timestamp_ms: u64, reading: AccelReading) -> Result<AccelReading> {
        let Some(axis) = reading.first_non_finite_axis() else {
            self.last_valid = Some(reading);
            return Ok(reading);
        };

        self.rejected_samples += 1;
        match (self.config.input.invalid_samples, self.last_valid) {
            (InvalidSamplePolicy::HoldLast, Some(previous)) => {
                warn!(timestamp_ms, axis, "non-finite reading replaced with last valid one");
                Ok(previous)
            }
            _ => {
                warn!(timestamp_ms, axis, "non-finite reading rejected");
                Err(GaitError::invalid_sample(
                    timestamp_ms,
                    format!("{axis} axis is not finite"),
                ))
            }
        }
    }
}

impl Default for StreamProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts a monitoring session if the host reports both sensors present.
///
/// No processor is built when either sensor is missing; the host is
/// expected to show an unavailability notice instead.
pub fn start_session(availability: SensorAvailability, config: GaitConfig) -> Result<StreamProcessor> {
    if !availability.is_ready() {
        let missing = availability.missing().join(", ");
        warn!(%missing, "sensor hardware missing; not starting session");
        return Err(GaitError::sensor_unavailable(missing));
    }

    let processor = StreamProcessor::with_config(config)?;
    info!(
        trigger = ?processor.config.steps.trigger,
        window = processor.config.buffers.sample_capacity,
        "gait monitoring session started"
    );
    Ok(processor)
}
