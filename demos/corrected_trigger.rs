/// Compares the two step trigger policies on a 10 Hz trace.
///
/// With peaks every 0.5 s and a 2 s window, a peak is always in view, so the
/// default policy re-triggers every 100 ms and never accepts an interval.
/// `NewPeakOnly` consumes each peak once and recovers 120 steps/min.
use gait_sensing::{GaitConfig, StepTrigger, StreamProcessor};

fn main() {
    let mut corrected = GaitConfig::default();
    corrected.steps.trigger = StepTrigger::NewPeakOnly;

    let mut processors = [
        ("any_peak_in_window", StreamProcessor::new()),
        (
            "new_peak_only",
            StreamProcessor::with_config(corrected).expect("default-derived config is valid"),
        ),
    ];

    for i in 0..200u64 {
        let y = if i % 5 == 2 { 2.0 } else { 1.0 };
        for (_, processor) in processors.iter_mut() {
            if let Err(err) = processor.ingest(i * 100, 0.0, y, 0.0) {
                eprintln!("rejected sample: {err}");
            }
        }
    }

    for (name, processor) in &processors {
        let snapshot = processor.snapshot();
        println!(
            "{name:>20}: cadence={} spm, contact={} ms, pace={}/km, triggers={}",
            snapshot.cadence,
            snapshot.ground_contact_time,
            snapshot.pace,
            processor.step_count()
        );
    }
}
