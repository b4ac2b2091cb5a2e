//! Raw metric estimators derived from the sample window and cadence.
//!
//! These are empirical heuristics, not physical models. The calibration
//! constants come from [`crate::config`] so they can be retuned per device.

use crate::config::{ContactTimeConfig, OscillationConfig};
use crate::types::Pace;

/// Vertical oscillation in centimeters from the peak-to-peak range of the
/// vertical component, clamped to the configured bounds.
///
/// Returns 0.0 for an empty window.
pub fn vertical_oscillation<I>(verticals: I, config: &OscillationConfig) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = verticals.into_iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    ((max - min) * config.multiplier).clamp(config.min_cm, config.max_cm)
}

/// Ground contact time in milliseconds from cadence.
///
/// Faster cadence means shorter contact. Zero cadence (no steps yet)
/// yields 0.0 rather than a clamped value.
pub fn ground_contact_time(cadence: f64, config: &ContactTimeConfig) -> f64 {
    if cadence == 0.0 {
        return 0.0;
    }
    let estimate = config.base_ms - (cadence - config.reference_cadence) * config.slope_ms_per_spm;
    estimate.clamp(config.min_ms, config.max_ms)
}

/// Pace per kilometer assuming every step covers `stride_length_m`.
///
/// Seconds that round up to 60 carry into the minute, so a pace of
/// 5.999 min/km renders `6:00`. The plain floor-and-round formula used by
/// earlier clients renders the same value as `5:60`.
pub fn pace_from_cadence(cadence: f64, stride_length_m: f64) -> Pace {
    if !(cadence > 0.0) || !(stride_length_m > 0.0) {
        return Pace::ZERO;
    }

    let speed_km_per_h = (cadence * stride_length_m * 60.0) / 1000.0;
    let pace_min_per_km = 60.0 / speed_km_per_h;
    if !pace_min_per_km.is_finite() {
        return Pace::ZERO;
    }

    let mut minutes = pace_min_per_km.floor() as u32;
    let mut seconds = ((pace_min_per_km - pace_min_per_km.floor()) * 60.0).round() as u32;
    // 5:59.6 rounds to 6:00, not 5:60
    if seconds >= 60 {
        minutes = minutes.saturating_add(1);
        seconds -= 60;
    }

    Pace { minutes, seconds }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillation_scales_range() {
        let config = OscillationConfig::default();
        // Range 1.0 g * 8 = 8 cm
        let cm = vertical_oscillation([0.5, 1.5, 1.0, 0.9], &config);
        assert!((cm - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_oscillation_clamps() {
        let config = OscillationConfig::default();
        assert_eq!(vertical_oscillation([1.0, 1.0, 1.0], &config), 2.0);
        assert_eq!(vertical_oscillation([-3.0, 3.0], &config), 20.0);
        assert_eq!(vertical_oscillation(std::iter::empty::<f64>(), &config), 0.0);
    }

    #[test]
    fn test_gct_reference_point() {
        let config = ContactTimeConfig::default();
        assert_eq!(ground_contact_time(160.0, &config), 300.0);
        assert_eq!(ground_contact_time(180.0, &config), 260.0);
        assert_eq!(ground_contact_time(120.0, &config), 380.0);
    }

    #[test]
    fn test_gct_clamps_and_zero() {
        let config = ContactTimeConfig::default();
        assert_eq!(ground_contact_time(0.0, &config), 0.0);
        assert_eq!(ground_contact_time(20.0, &config), 400.0);
        assert_eq!(ground_contact_time(250.0, &config), 180.0);
    }

    #[test]
    fn test_gct_always_in_range_for_positive_cadence() {
        let config = ContactTimeConfig::default();
        for spm in 1..300 {
            let gct = ground_contact_time(spm as f64, &config);
            assert!((180.0..=400.0).contains(&gct));
        }
    }

    #[test]
    fn test_pace_zero_cadence() {
        assert_eq!(pace_from_cadence(0.0, 0.7), Pace::ZERO);
        assert_eq!(pace_from_cadence(-3.0, 0.7), Pace::ZERO);
    }

    #[test]
    fn test_pace_formula() {
        // 120 spm * 0.7 m = 84 m/min -> 11.904... min/km -> 11:54
        let pace = pace_from_cadence(120.0, 0.7);
        assert_eq!(pace, Pace { minutes: 11, seconds: 54 });
        assert_eq!(pace.to_string(), "11:54");

        // 180 spm -> 126 m/min -> 7.936... min/km -> 7:56
        assert_eq!(pace_from_cadence(180.0, 0.7).to_string(), "7:56");
    }

    #[test]
    fn test_pace_carries_rounded_minute() {
        // 1000 / (x * 0.7) = 5.999 min/km -> x ~= 238.135
        let cadence = 1000.0 / (0.7 * 5.999);
        assert_eq!(pace_from_cadence(cadence, 0.7).to_string(), "6:00");
    }
}
