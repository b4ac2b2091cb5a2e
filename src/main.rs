//! Gait replay tool
//!
//! Replays a recorded accelerometer trace through a single stream processor
//! and prints the snapshot produced for every sample, one JSON object per
//! line.
//!
//! Input lines are `timestamp_ms,x,y,z` with readings in g. Blank lines,
//! `#` comments and a non-numeric header line are skipped.
//!
//! Run with:  `RUST_LOG=debug gait-replay run.csv`

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gait_sensing::{config, GaitError, MetricsSnapshot, StreamProcessor};

#[derive(Parser, Debug)]
#[command(name = "gait-replay", version, about = "Replay an accelerometer trace through the gait engine")]
struct Args {
    /// Trace file to replay; reads stdin when omitted
    input: Option<PathBuf>,

    /// TOML config file (defaults to $XDG_CONFIG_HOME/gait/gait.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print only the final snapshot
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, PartialEq)]
struct TraceRow {
    timestamp_ms: u64,
    x: f64,
    y: f64,
    z: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("gait-replay v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone().unwrap_or_else(config::default_path);
    let gait_config = config::load(&config_path)
        .with_context(|| format!("loading config from '{}'", config_path.display()))?;
    let mut processor = StreamProcessor::with_config(gait_config)?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut last = MetricsSnapshot::default();
    let mut replayed = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;
        let Some(row) = parse_row(&line, line_no)? else {
            continue;
        };

        match processor.ingest(row.timestamp_ms, row.x, row.y, row.z) {
            Ok(snapshot) => {
                if !args.summary {
                    serde_json::to_writer(&mut out, &snapshot)?;
                    writeln!(out)?;
                }
                last = snapshot;
                replayed += 1;
            }
            Err(err @ GaitError::InvalidSample { .. }) => {
                tracing::warn!(line = line_no, "skipping sample: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    if args.summary {
        serde_json::to_writer_pretty(&mut out, &last)?;
        writeln!(out)?;
    }
    out.flush()?;

    tracing::info!(
        samples = replayed,
        rejected = processor.rejected_samples(),
        steps = processor.step_count(),
        "replay finished"
    );
    Ok(())
}

/// Parse one trace line. Returns `None` for lines that carry no sample.
fn parse_row(line: &str, line_no: usize) -> Result<Option<TraceRow>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if fields.len() != 4 {
        bail!("line {line_no}: expected 4 fields, found {}", fields.len());
    }

    // Header row
    if line_no == 1 && fields[0].parse::<u64>().is_err() {
        return Ok(None);
    }

    let timestamp_ms = fields[0]
        .parse()
        .with_context(|| format!("line {line_no}: bad timestamp '{}'", fields[0]))?;
    let mut axes = [0.0f64; 3];
    for (axis, field) in axes.iter_mut().zip(&fields[1..]) {
        *axis = field
            .parse()
            .with_context(|| format!("line {line_no}: bad reading '{field}'"))?;
    }

    Ok(Some(TraceRow {
        timestamp_ms,
        x: axes[0],
        y: axes[1],
        z: axes[2],
    }))
}
