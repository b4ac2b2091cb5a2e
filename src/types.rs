//! Core data types for the gait sensing engine.
//!
//! This module defines the values that flow between the host and the
//! streaming processor: raw readings in, derived samples in the rolling
//! buffer, smoothed state carried across calls, and the display-ready
//! snapshot handed back out.
//!
//! Design principle: if a concept exists, it gets a type. Raw tuples never
//! cross the host boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw three-axis accelerometer reading in g-units, as delivered by the
/// sensor subscription.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccelReading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelReading {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the reading.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Name of the first non-finite axis, if any.
    pub(crate) fn first_non_finite_axis(&self) -> Option<&'static str> {
        if !self.x.is_finite() {
            Some("x")
        } else if !self.y.is_finite() {
            Some("y")
        } else if !self.z.is_finite() {
            Some("z")
        } else {
            None
        }
    }
}

/// One entry in the acceleration history.
///
/// Derived from a raw reading and immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// Total acceleration with the 1 g gravity contribution removed.
    pub magnitude: f64,
    /// The y axis, treated as vertical. Not orientation corrected.
    pub vertical_component: f64,
}

impl Sample {
    /// Derive a sample from a raw reading.
    ///
    /// Assumes the device reports acceleration in g-units, so a device at
    /// rest has a norm of 1.0 and a magnitude of 0.0.
    pub fn from_reading(timestamp_ms: u64, reading: AccelReading) -> Self {
        Self {
            timestamp_ms,
            magnitude: reading.norm() - 1.0,
            vertical_component: reading.y,
        }
    }
}

/// Exponentially smoothed state carried forward across ingest calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothedMetrics {
    /// Steps per minute.
    pub cadence: f64,
    /// Centimeters.
    pub vertical_oscillation: f64,
    /// Milliseconds.
    pub ground_contact_time: f64,
}

/// Running pace in minutes and seconds per kilometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pace {
    pub minutes: u32,
    pub seconds: u32,
}

impl Pace {
    /// Sentinel pace shown before any step has been detected.
    pub const ZERO: Pace = Pace {
        minutes: 0,
        seconds: 0,
    };
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// Display-ready metrics returned on every ingest call.
///
/// Recomputed from [`SmoothedMetrics`] each call, never stored as state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Steps per minute, rounded to the nearest integer.
    pub cadence: u32,
    /// Centimeters, rounded to one decimal.
    pub vertical_oscillation: f64,
    /// Milliseconds, rounded to the nearest integer.
    pub ground_contact_time: u32,
    /// Minutes per kilometer formatted as `M:SS`.
    pub pace: String,
}

impl MetricsSnapshot {
    /// Round smoothed state into a snapshot.
    pub fn from_smoothed(smoothed: &SmoothedMetrics, pace: Pace) -> Self {
        Self {
            cadence: round_to_u32(smoothed.cadence),
            vertical_oscillation: (smoothed.vertical_oscillation * 10.0).round() / 10.0,
            ground_contact_time: round_to_u32(smoothed.ground_contact_time),
            pace: pace.to_string(),
        }
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::from_smoothed(&SmoothedMetrics::default(), Pace::ZERO)
    }
}

// Saturating: negative or NaN values become 0.
fn round_to_u32(value: f64) -> u32 {
    value.round() as u32
}

/// Which sensors the host reported as present at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorAvailability {
    pub accelerometer: bool,
    pub gyroscope: bool,
}

impl SensorAvailability {
    /// Both sensors present.
    pub const ALL: SensorAvailability = SensorAvailability {
        accelerometer: true,
        gyroscope: true,
    };

    /// True when monitoring may start.
    pub fn is_ready(&self) -> bool {
        self.accelerometer && self.gyroscope
    }

    /// Names of the sensors that are absent.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.accelerometer {
            missing.push("accelerometer");
        }
        if !self.gyroscope {
            missing.push("gyroscope");
        }
        missing
    }
}
