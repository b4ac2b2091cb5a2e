//! C FFI Bindings for mobile host integration
//!
//! This module exposes the gait processor to mobile platforms via C ABI.
//! The host calls `gait_ingest()` from its accelerometer callback and
//! renders the returned snapshot.
//!
//! Memory Safety:
//! - All returned strings must be freed with `gait_free_string()`
//! - The processor instance must be freed with `gait_processor_destroy()`
//! - NULL checks are performed on all inputs
//!
//! Thread Safety:
//! - The processor is NOT thread-safe. Use a single thread or mutex.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::{self, GaitConfig};
use crate::error::GaitError;
use crate::pipeline::{start_session, StreamProcessor};
use crate::types::{MetricsSnapshot, SensorAvailability};

// ============================================================================
// OPAQUE HANDLE TYPES
// ============================================================================

/// Opaque handle to a gait monitoring session.
pub struct GaitProcessor {
    processor: StreamProcessor,
    last_snapshot: MetricsSnapshot,
}

/// Result status codes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaitStatus {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer provided.
    NullPointer = 1,
    /// Reading contained a NaN or infinite component.
    InvalidSample = 2,
    /// Required sensor hardware is missing.
    SensorUnavailable = 3,
    /// Internal error.
    InternalError = 4,
}

impl From<&GaitError> for GaitStatus {
    fn from(err: &GaitError) -> Self {
        match err {
            GaitError::InvalidSample { .. } => GaitStatus::InvalidSample,
            GaitError::SensorUnavailable(_) => GaitStatus::SensorUnavailable,
            GaitError::InvalidConfig(_) | GaitError::Config(_) => GaitStatus::InternalError,
        }
    }
}

/// Snapshot as returned across the C boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct GaitSnapshotOutput {
    /// Steps per minute.
    pub cadence: u32,
    /// Centimeters, one decimal.
    pub vertical_oscillation: f64,
    /// Milliseconds.
    pub ground_contact_time: u32,
    /// Pace minutes per kilometer.
    pub pace_minutes: u32,
    /// Pace seconds (0-59).
    pub pace_seconds: u32,
}

impl GaitSnapshotOutput {
    fn fill(&mut self, snapshot: &MetricsSnapshot) {
        self.cadence = snapshot.cadence;
        self.vertical_oscillation = snapshot.vertical_oscillation;
        self.ground_contact_time = snapshot.ground_contact_time;
        let (minutes, seconds) = split_pace(&snapshot.pace);
        self.pace_minutes = minutes;
        self.pace_seconds = seconds;
    }
}

fn split_pace(pace: &str) -> (u32, u32) {
    pace.split_once(':')
        .and_then(|(m, s)| Some((m.parse().ok()?, s.parse().ok()?)))
        .unwrap_or((0, 0))
}

// ============================================================================
// PROCESSOR LIFECYCLE
// ============================================================================

/// Create a processor for a new monitoring session.
///
/// # Parameters
/// - `accel_available`, `gyro_available`: non-zero when the host reported
///   the sensor as present.
///
/// # Returns
/// - Pointer to GaitProcessor on success.
/// - NULL when either sensor is missing. The host should show an
///   unavailability notice instead of metrics.
#[no_mangle]
pub extern "C" fn gait_processor_create(
    accel_available: i32,
    gyro_available: i32,
) -> *mut GaitProcessor {
    open_session(accel_available, gyro_available, GaitConfig::default())
}

/// Create a processor tuned by a TOML configuration document.
///
/// # Safety
/// - `config_toml` must be NULL or a valid NUL-terminated string.
///
/// # Parameters
/// - `config_toml`: TOML text using the same sections as the config file.
///   NULL selects the default calibration.
///
/// # Returns
/// - Pointer to GaitProcessor on success.
/// - NULL when either sensor is missing or the configuration is not valid
///   UTF-8, fails to parse or fails validation.
#[no_mangle]
pub unsafe extern "C" fn gait_processor_create_with_config(
    accel_available: i32,
    gyro_available: i32,
    config_toml: *const c_char,
) -> *mut GaitProcessor {
    let gait_config = if config_toml.is_null() {
        GaitConfig::default()
    } else {
        let Ok(raw) = CStr::from_ptr(config_toml).to_str() else {
            tracing::warn!("processor config is not valid UTF-8");
            return ptr::null_mut();
        };
        match config::parse(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("rejecting processor config: {err}");
                return ptr::null_mut();
            }
        }
    };

    open_session(accel_available, gyro_available, gait_config)
}

fn open_session(accel_available: i32, gyro_available: i32, config: GaitConfig) -> *mut GaitProcessor {
    let availability = SensorAvailability {
        accelerometer: accel_available != 0,
        gyroscope: gyro_available != 0,
    };

    match start_session(availability, config) {
        Ok(processor) => Box::into_raw(Box::new(GaitProcessor {
            processor,
            last_snapshot: MetricsSnapshot::default(),
        })),
        Err(_) => ptr::null_mut(),
    }
}

/// Destroy a processor instance.
///
/// # Safety
/// - `processor` must be a valid pointer from `gait_processor_create()`.
/// - Must not be called more than once for the same pointer.
#[no_mangle]
pub unsafe extern "C" fn gait_processor_destroy(processor: *mut GaitProcessor) {
    if !processor.is_null() {
        drop(Box::from_raw(processor));
    }
}

// ============================================================================
// SAMPLE PROCESSING
// ============================================================================

/// Process a single accelerometer reading.
///
/// # Safety
/// - `processor` must be a valid pointer.
/// - `output` must be a valid pointer to receive results.
///
/// # Parameters
/// - `timestamp_ms`: Monotonic sample timestamp in milliseconds.
/// - `x/y/z`: Accelerometer readings in g.
#[no_mangle]
pub unsafe extern "C" fn gait_ingest(
    processor: *mut GaitProcessor,
    timestamp_ms: u64,
    x: f64, y: f64, z: f64,
    output: *mut GaitSnapshotOutput,
) -> GaitStatus {
    if processor.is_null() || output.is_null() {
        return GaitStatus::NullPointer;
    }

    let handle = &mut *processor;
    let output = &mut *output;

    match handle.processor.ingest(timestamp_ms, x, y, z) {
        Ok(snapshot) => {
            output.fill(&snapshot);
            handle.last_snapshot = snapshot;
            GaitStatus::Ok
        }
        Err(err) => GaitStatus::from(&err),
    }
}

/// Forward a gyroscope reading. Reserved for future estimators.
///
/// # Safety
/// - `processor` must be a valid pointer.
#[no_mangle]
pub unsafe extern "C" fn gait_ingest_orientation(
    processor: *mut GaitProcessor,
    x: f64, y: f64, z: f64,
) -> GaitStatus {
    if processor.is_null() {
        return GaitStatus::NullPointer;
    }
    let handle = &mut *processor;
    handle.processor.ingest_orientation(x, y, z);
    GaitStatus::Ok
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

/// Get the last snapshot as JSON.
///
/// # Safety
/// - `processor` must be a valid pointer.
///
/// # Returns
/// - JSON string (MUST be freed with `gait_free_string()`).
/// - NULL on error.
#[no_mangle]
pub unsafe extern "C" fn gait_snapshot_json(processor: *const GaitProcessor) -> *mut c_char {
    if processor.is_null() {
        return ptr::null_mut();
    }

    let handle = &*processor;
    let Ok(json) = serde_json::to_string(&handle.last_snapshot) else {
        return ptr::null_mut();
    };

    match CString::new(json) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string returned by `gait_snapshot_json()`.
///
/// # Safety
/// - `ptr` must be a string returned by this library.
/// - Must not be called more than once for the same pointer.
#[no_mangle]
pub unsafe extern "C" fn gait_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// STATUS QUERIES
// ============================================================================

/// Get the number of step triggers seen this session.
///
/// # Safety
/// - `processor` must be a valid pointer or NULL.
#[no_mangle]
pub unsafe extern "C" fn gait_get_step_count(processor: *const GaitProcessor) -> i64 {
    if processor.is_null() {
        return -1;
    }
    let handle = &*processor;
    handle.processor.step_count() as i64
}

/// Get the library version string.
///
/// # Returns
/// - Static string, do NOT free.
#[no_mangle]
pub extern "C" fn gait_version() -> *const c_char {
    static VERSION: &[u8] = concat!("gait-sensing/", env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

// ============================================================================
// TESTS
// ============================================================================
