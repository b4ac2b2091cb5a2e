//! Engine configuration and calibration constants.
//!
//! Every tuning value the estimators use lives here as a named field so it
//! can be overridden from a TOML file without touching the algorithms.
//! Defaults are the empirically tuned values for a phone carried by a
//! runner and sampled at 10 Hz.
//!
//! ```toml
//! [steps]
//! trigger = "new_peak_only"
//!
//! [pace]
//! stride_length_m = 0.75
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GaitError, Result};

/// Rolling buffer sizes and warm-up thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Capacity of the acceleration history.
    pub sample_capacity: usize,
    /// Capacity of the step interval history.
    pub interval_capacity: usize,
    /// Samples required before cadence is estimated.
    pub min_samples_for_cadence: usize,
    /// Samples required before vertical oscillation is estimated.
    pub min_samples_for_oscillation: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            sample_capacity: 20,
            interval_capacity: 10,
            min_samples_for_cadence: 10,
            min_samples_for_oscillation: 5,
        }
    }
}

/// Peak detection tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakDetectorConfig {
    /// Minimum magnitude above the gravity baseline, in g.
    pub threshold: f64,
    /// Minimum spacing between accepted peaks, in samples.
    pub min_distance: usize,
}

impl Default for PeakDetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            min_distance: 3,
        }
    }
}

/// When a peak in the rolling window counts as a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepTrigger {
    /// Any peak in the window re-triggers the step timestamp, measured
    /// from the current sample.
    #[default]
    AnyPeakInWindow,
    /// Only a peak on a later sample than the last consumed one counts;
    /// intervals are measured between peak samples.
    NewPeakOnly,
}

/// Step interval plausibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    pub trigger: StepTrigger,
    /// Shortest accepted step interval in seconds (200 steps/min).
    pub min_interval_s: f64,
    /// Longest accepted step interval in seconds (20 steps/min).
    pub max_interval_s: f64,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            trigger: StepTrigger::default(),
            min_interval_s: 0.3,
            max_interval_s: 3.0,
        }
    }
}

/// Vertical oscillation calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationConfig {
    /// Centimeters per g of peak-to-peak vertical acceleration.
    pub multiplier: f64,
    pub min_cm: f64,
    pub max_cm: f64,
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            multiplier: 8.0,
            min_cm: 2.0,
            max_cm: 20.0,
        }
    }
}

/// Linear ground contact time model: `base - (cadence - reference) * slope`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactTimeConfig {
    pub base_ms: f64,
    pub reference_cadence: f64,
    /// Milliseconds of contact time lost per extra step/min.
    pub slope_ms_per_spm: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl Default for ContactTimeConfig {
    fn default() -> Self {
        Self {
            base_ms: 300.0,
            reference_cadence: 160.0,
            slope_ms_per_spm: 2.0,
            min_ms: 180.0,
            max_ms: 400.0,
        }
    }
}

/// Exponential smoothing factors, each in (0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub cadence: f64,
    pub vertical_oscillation: f64,
    pub ground_contact_time: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            cadence: 0.3,
            vertical_oscillation: 0.2,
            ground_contact_time: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceConfig {
    /// Assumed distance covered per step, in meters.
    pub stride_length_m: f64,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            stride_length_m: 0.7,
        }
    }
}

/// What to do with a reading that has a NaN or infinite component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSamplePolicy {
    /// Fail the call and leave all state untouched.
    #[default]
    Reject,
    /// Substitute the last valid reading.
    HoldLast,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub invalid_samples: InvalidSamplePolicy,
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitConfig {
    pub buffers: BufferConfig,
    pub peaks: PeakDetectorConfig,
    pub steps: StepConfig,
    pub oscillation: OscillationConfig,
    pub contact_time: ContactTimeConfig,
    pub smoothing: SmoothingConfig,
    pub pace: PaceConfig,
    pub input: InputConfig,
}

impl GaitConfig {
    /// Check that every value is usable by the estimators.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("peaks.threshold", self.peaks.threshold),
            ("steps.min_interval_s", self.steps.min_interval_s),
            ("steps.max_interval_s", self.steps.max_interval_s),
            ("oscillation.multiplier", self.oscillation.multiplier),
            ("oscillation.min_cm", self.oscillation.min_cm),
            ("oscillation.max_cm", self.oscillation.max_cm),
            ("contact_time.base_ms", self.contact_time.base_ms),
            ("contact_time.reference_cadence", self.contact_time.reference_cadence),
            ("contact_time.slope_ms_per_spm", self.contact_time.slope_ms_per_spm),
            ("contact_time.min_ms", self.contact_time.min_ms),
            ("contact_time.max_ms", self.contact_time.max_ms),
            ("smoothing.cadence", self.smoothing.cadence),
            ("smoothing.vertical_oscillation", self.smoothing.vertical_oscillation),
            ("smoothing.ground_contact_time", self.smoothing.ground_contact_time),
            ("pace.stride_length_m", self.pace.stride_length_m),
        ] {
            check_finite(name, value)?;
        }
        if self.buffers.sample_capacity == 0 || self.buffers.interval_capacity == 0 {
            return Err(GaitError::invalid_config("buffer capacities must be at least 1"));
        }
        if self.buffers.min_samples_for_cadence > self.buffers.sample_capacity {
            return Err(GaitError::invalid_config(format!(
                "min_samples_for_cadence ({}) exceeds sample_capacity ({})",
                self.buffers.min_samples_for_cadence, self.buffers.sample_capacity
            )));
        }
        if !(self.peaks.threshold >= 0.0) {
            return Err(GaitError::invalid_config("peak threshold must be non-negative"));
        }
        if !(self.steps.min_interval_s > 0.0 && self.steps.min_interval_s <= self.steps.max_interval_s)
        {
            return Err(GaitError::invalid_config(format!(
                "step interval bounds [{}, {}] are not a positive range",
                self.steps.min_interval_s, self.steps.max_interval_s
            )));
        }
        check_range("oscillation", self.oscillation.min_cm, self.oscillation.max_cm)?;
        check_range("contact_time", self.contact_time.min_ms, self.contact_time.max_ms)?;
        check_factor("smoothing.cadence", self.smoothing.cadence)?;
        check_factor("smoothing.vertical_oscillation", self.smoothing.vertical_oscillation)?;
        check_factor("smoothing.ground_contact_time", self.smoothing.ground_contact_time)?;
        if !(self.pace.stride_length_m > 0.0) {
            return Err(GaitError::invalid_config("stride length must be positive"));
        }
        Ok(())
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GaitError::invalid_config(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(GaitError::invalid_config(format!(
            "{name} clamp range [{min}, {max}] is inverted"
        )))
    }
}

fn check_factor(name: &str, factor: f64) -> Result<()> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(())
    } else {
        Err(GaitError::invalid_config(format!(
            "{name} must be in (0, 1], got {factor}"
        )))
    }
}

/// Load configuration from a TOML file. Returns `GaitConfig::default()` if
/// the file doesn't exist.
pub fn load(path: impl AsRef<Path>) -> Result<GaitConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(GaitConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| GaitError::config(format!("cannot read '{}': {e}", path.display())))?;

    let config = parse(&raw)?;
    tracing::debug!(path = %path.display(), "loaded gait config");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse(raw: &str) -> Result<GaitConfig> {
    let config: GaitConfig =
        toml::from_str(raw).map_err(|e| GaitError::config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("gait").join("gait.toml")
}
