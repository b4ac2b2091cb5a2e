//! Gait Sensing Engine Library
//!
//! A streaming signal-processing kernel that turns a live 3-axis
//! accelerometer stream into running-gait metrics: cadence, vertical
//! oscillation, ground contact time and pace. Everything runs on-device,
//! synchronously, over small fixed-size buffers.
//!
//! # Design Philosophy
//!
//! - **One stateful object**: [`StreamProcessor`] owns all session state;
//!   the [`signal`] primitives are pure functions.
//! - **Bounded work**: every ingest call touches at most 20 samples and
//!   10 intervals.
//! - **Tunable heuristics**: every calibration constant is a named field of
//!   [`GaitConfig`].
//! - **No silent poisoning**: non-finite readings are rejected before they
//!   reach the smoothed state.
//!
//! # Example
//!
//! ```
//! use gait_sensing::StreamProcessor;
//!
//! let mut processor = StreamProcessor::new();
//! let snapshot = processor.ingest(0, 0.0, 1.0, 0.0).unwrap();
//! assert_eq!(snapshot.cadence, 0);
//! assert_eq!(snapshot.pace, "0:00");
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod estimators;
pub mod ffi;
pub mod pipeline;
pub mod signal;
pub mod step_detection;
pub mod types;

#[cfg(test)]
mod integration_tests;

// Re-export commonly used types
pub use config::{GaitConfig, InvalidSamplePolicy, StepTrigger};
pub use error::{GaitError, Result};
pub use pipeline::{start_session, StreamProcessor};
pub use signal::{detect_peaks, moving_average, smooth_value};
pub use types::{AccelReading, MetricsSnapshot, Pace, Sample, SensorAvailability, SmoothedMetrics};
