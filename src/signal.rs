//! Stateless signal primitives.
//!
//! This module provides the numeric building blocks of the engine:
//! - Peak detection over a short sequence (footstrike proxy)
//! - Single-pole exponential smoothing
//! - Trailing moving average
//!
//! Design note: nothing here keeps state. Callers own every buffer and every
//! previous value, so the functions can be called from any context without
//! setup and are trivially restartable.

/// Find strict local maxima above `threshold`, spaced at least
/// `min_distance` indices apart.
///
/// Only interior indices `1..len-1` are considered. A candidate is accepted
/// when it lies at least `min_distance` indices after the previously
/// accepted peak, so one broad bump cannot register as several steps.
/// Returns indices in ascending order; empty for sequences shorter than 3.
pub fn detect_peaks(sequence: &[f64], threshold: f64, min_distance: usize) -> Vec<usize> {
    let mut peaks: Vec<usize> = Vec::new();
    if sequence.len() < 3 {
        return peaks;
    }

    for i in 1..sequence.len() - 1 {
        let value = sequence[i];
        if value > threshold && value > sequence[i - 1] && value > sequence[i + 1] {
            let spaced = peaks.last().map_or(true, |&last| i - last >= min_distance);
            if spaced {
                peaks.push(i);
            }
        }
    }

    peaks
}

/// Single-pole exponential smoothing: `previous * (1 - factor) + current * factor`.
///
/// `factor` is expected in (0, 1]. A factor of 1 passes `current` through
/// unchanged; smaller factors smooth more heavily.
#[inline]
pub fn smooth_value(current: f64, previous: f64, factor: f64) -> f64 {
    previous * (1.0 - factor) + current * factor
}

/// Trailing moving average with a window that shrinks near the start.
///
/// Output has the same length as the input. Element `i` is the mean of
/// `sequence[i + 1 - w..=i]` where `w = min(window_size, i + 1)`.
/// A `window_size` of 0 behaves like 1.
pub fn moving_average(sequence: &[f64], window_size: usize) -> Vec<f64> {
    let window = window_size.max(1);
    let mut result = Vec::with_capacity(sequence.len());
    let mut sum = 0.0;

    // Running sum, O(n) overall
    for (i, &value) in sequence.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= sequence[i - window];
        }
        let count = (i + 1).min(window);
        result.push(sum / count as f64);
    }

    result
}
