/// Basic usage example: feed accelerometer readings, print gait metrics
use gait_sensing::{start_session, GaitConfig, MetricsSnapshot, SensorAvailability};

fn main() {
    println!("=== Gait Sensing Engine: Basic Example ===\n");

    // The host checks sensor hardware once at startup
    let availability = SensorAvailability::ALL;
    let mut processor = match start_session(availability, GaitConfig::default()) {
        Ok(processor) => processor,
        Err(err) => {
            println!("Sensors unavailable: {err}");
            return;
        }
    };

    // Simulated run: a footstrike spike every fourth sample, one sample
    // every 500 ms (the host may deliver at any rate)
    let readings: Vec<(u64, [f64; 3])> = (0..40)
        .map(|i| {
            let y = if i % 4 == 1 { 2.1 } else { 1.0 };
            (i as u64 * 500, [0.05, y, -0.1])
        })
        .collect();

    println!("Processing {} samples...\n", readings.len());

    for (timestamp, [x, y, z]) in readings {
        // Gyroscope readings are accepted but not used yet
        processor.ingest_orientation(0.01, 0.0, 0.02);

        match processor.ingest(timestamp, x, y, z) {
            Ok(snapshot) if timestamp % 2000 == 0 => print_snapshot(timestamp, &snapshot),
            Ok(_) => {}
            Err(err) => println!("rejected: {err}"),
        }
    }

    println!("\n=== Summary ===");
    print_snapshot(19_500, &processor.snapshot());
    println!("Step triggers: {}", processor.step_count());
    println!("Intervals held: {:?}", processor.step_intervals());
}

fn print_snapshot(timestamp: u64, snapshot: &MetricsSnapshot) {
    println!(
        "t={:>6}ms  cadence={:>3} spm  oscillation={:>4.1} cm  contact={:>3} ms  pace={}/km",
        timestamp,
        snapshot.cadence,
        snapshot.vertical_oscillation,
        snapshot.ground_contact_time,
        snapshot.pace
    );
}
