/// Integration tests for the complete gait metrics pipeline
/// Feeds synthetic running traces through a StreamProcessor and checks the
/// snapshots a host would render.

#[cfg(test)]
mod integration_tests {
    use crate::config::{GaitConfig, StepTrigger};
    use crate::error::GaitError;
    use crate::pipeline::StreamProcessor;
    use crate::types::MetricsSnapshot;

    /// Helper: spike trace, one vertical spike of `spike_g` every `period` samples.
    ///
    /// Readings sit at 1 g on the y axis between spikes so the gravity-removed
    /// magnitude is exactly 0 there and `spike_g - 1` on a spike.
    fn spike_trace(
        num_samples: usize,
        interval_ms: u64,
        period: usize,
        offset: usize,
        spike_g: f64,
    ) -> Vec<(u64, f64, f64, f64)> {
        (0..num_samples)
            .map(|i| {
                let y = if i % period == offset { spike_g } else { 1.0 };
                (i as u64 * interval_ms, 0.0, y, 0.0)
            })
            .collect()
    }

    /// Helper: sinusoidal bounce on the y axis.
    fn sine_trace(
        num_samples: usize,
        interval_ms: u64,
        period_s: f64,
        amplitude_g: f64,
    ) -> Vec<(u64, f64, f64, f64)> {
        (0..num_samples)
            .map(|i| {
                let t = i as f64 * interval_ms as f64 / 1000.0;
                let phase = 2.0 * std::f64::consts::PI * t / period_s + 0.3;
                (i as u64 * interval_ms, 0.0, 1.0 + amplitude_g * phase.sin(), 0.0)
            })
            .collect()
    }

    fn run(processor: &mut StreamProcessor, trace: &[(u64, f64, f64, f64)]) -> Vec<MetricsSnapshot> {
        trace
            .iter()
            .map(|&(t, x, y, z)| processor.ingest(t, x, y, z).unwrap())
            .collect()
    }

    fn corrected_processor() -> StreamProcessor {
        let mut config = GaitConfig::default();
        config.steps.trigger = StepTrigger::NewPeakOnly;
        StreamProcessor::with_config(config).unwrap()
    }

    #[test]
    fn test_warm_up_reports_no_cadence() {
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(9, 500, 4, 1, 2.0);

        for snapshot in run(&mut processor, &trace) {
            assert_eq!(snapshot.cadence, 0);
            assert_eq!(snapshot.ground_contact_time, 0);
            assert_eq!(snapshot.pace, "0:00");
        }
        assert_eq!(processor.last_step_ms(), None);
    }

    #[test]
    fn test_flat_signal_settles_on_oscillation_floor() {
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(60, 100, 1000, 999, 1.0);
        let snapshots = run(&mut processor, &trace);

        let last = snapshots.last().unwrap();
        assert_eq!(last.cadence, 0);
        assert_eq!(last.ground_contact_time, 0);
        assert_eq!(last.pace, "0:00");
        assert!((last.vertical_oscillation - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_interval_gives_smoothed_36() {
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(11, 500, 4, 1, 2.0);
        let snapshots = run(&mut processor, &trace);

        // 10th sample: peaks in window, first step timestamp only
        assert_eq!(snapshots[9].cadence, 0);
        assert_eq!(processor.step_intervals(), vec![0.5]);

        // 11th sample: one 0.5 s interval -> raw 120 -> 0.3 * 120
        let snapshot = &snapshots[10];
        assert_eq!(snapshot.cadence, 36);
        assert!((processor.smoothed().cadence - 36.0).abs() < 1e-9);
        // Raw GCT 380 smoothed from 0
        assert_eq!(snapshot.ground_contact_time, 114);
        assert_eq!(snapshot.pace, "39:41");
    }

    #[test]
    fn test_steady_intervals_converge_to_120() {
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(60, 500, 4, 1, 2.0);
        let snapshots = run(&mut processor, &trace);

        // Monotone approach from below
        let cadences: Vec<u32> = snapshots.iter().map(|s| s.cadence).collect();
        assert!(cadences.windows(2).all(|w| w[1] >= w[0]));

        let last = snapshots.last().unwrap();
        assert_eq!(last.cadence, 120);
        assert_eq!(last.ground_contact_time, 380);
        assert_eq!(last.pace, "11:54");
        // y swings between 1 g and 2 g -> 8 cm
        assert!((last.vertical_oscillation - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_convergence_rate_follows_smoothing_factor() {
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(11, 500, 4, 1, 2.0);
        run(&mut processor, &trace);

        // After n identical raw values the gap shrinks by 0.7 each call
        let mut expected = 36.0;
        for k in 11..20u64 {
            processor.ingest(k * 500, 0.0, if k % 4 == 1 { 2.0 } else { 1.0 }, 0.0).unwrap();
            expected = expected * 0.7 + 120.0 * 0.3;
            assert!((processor.smoothed().cadence - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_stale_peaks_at_10hz_never_yield_cadence() {
        // Peaks every 0.5 s, but one stays in the 2 s window on every call,
        // so the step timestamp advances every 0.1 s and every interval is
        // below the plausibility floor.
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(300, 100, 5, 2, 2.0);
        let snapshots = run(&mut processor, &trace);

        assert!(snapshots.iter().all(|s| s.cadence == 0));
        assert!(processor.step_intervals().is_empty());
        assert!(processor.step_count() > 250);
    }

    #[test]
    fn test_new_peak_only_recovers_cadence_at_10hz() {
        let mut processor = corrected_processor();
        let trace = spike_trace(300, 100, 5, 2, 2.0);
        let snapshots = run(&mut processor, &trace);

        assert!(processor.step_intervals().iter().all(|&i| (i - 0.5).abs() < 1e-9));
        let last = snapshots.last().unwrap();
        assert_eq!(last.cadence, 120);
        assert_eq!(last.ground_contact_time, 380);
        assert_eq!(last.pace, "11:54");
    }

    #[test]
    fn test_sine_bounce_at_150_spm() {
        let mut processor = corrected_processor();
        let trace = sine_trace(400, 100, 0.4, 0.6);
        let snapshots = run(&mut processor, &trace);

        let last = snapshots.last().unwrap();
        assert_eq!(last.cadence, 150);
        // 300 - (150 - 160) * 2
        assert_eq!(last.ground_contact_time, 320);
        assert_eq!(last.pace, "9:31");
        assert!((last.vertical_oscillation - 9.2).abs() < 0.15);
    }

    #[test]
    fn test_outputs_stay_in_range_after_warm_up() {
        let mut processor = corrected_processor();
        let trace = sine_trace(600, 100, 0.35, 1.5);
        let snapshots = run(&mut processor, &trace);

        for snapshot in &snapshots[100..] {
            assert!(snapshot.vertical_oscillation >= 2.0 - 1e-9);
            assert!(snapshot.vertical_oscillation <= 20.0 + 1e-9);
            if snapshot.cadence > 0 {
                assert!((180..=400).contains(&snapshot.ground_contact_time));
            }
        }
    }

    #[test]
    fn test_nan_mid_run_does_not_poison_state() {
        let mut processor = StreamProcessor::new();
        let trace = spike_trace(40, 500, 4, 1, 2.0);
        run(&mut processor, &trace[..20]);

        let err = processor.ingest(10_050, f64::NAN, f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, GaitError::InvalidSample { .. }));

        let snapshots = run(&mut processor, &trace[20..]);
        let smoothed = processor.smoothed();
        assert!(smoothed.cadence.is_finite());
        assert!(smoothed.vertical_oscillation.is_finite());
        assert!(smoothed.ground_contact_time.is_finite());
        assert_eq!(snapshots.last().unwrap().cadence, 120);
    }

    #[test]
    fn test_stride_length_override_changes_pace_only() {
        let mut config = GaitConfig::default();
        config.pace.stride_length_m = 1.0;
        let mut tuned = StreamProcessor::with_config(config).unwrap();
        let mut baseline = StreamProcessor::new();

        let trace = spike_trace(60, 500, 4, 1, 2.0);
        let a = run(&mut tuned, &trace).pop().unwrap();
        let b = run(&mut baseline, &trace).pop().unwrap();

        assert_eq!(a.cadence, b.cadence);
        assert_eq!(a.ground_contact_time, b.ground_contact_time);
        // 120 m/min -> 8:20 per km
        assert_eq!(a.pace, "8:20");
        assert_ne!(a.pace, b.pace);
    }
}
