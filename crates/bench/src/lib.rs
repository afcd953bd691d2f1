//! Benchmark runner: times codec encode/decode over a fixed binary payload.
//!
//! Everything here is strictly sequential and single-threaded; timing
//! validity depends on no two runs overlapping. Nothing is shared across
//! runs except the read-only payload.

use std::io::{self, Write};
use std::time::Instant;

use pack_bench_codec::{DecodeError, EncodeError, Format, Value};
use thiserror::Error;

/// Number of timed runs per codec and direction.
pub const RUNS: usize = 10;

/// Default payload path, fixed at build time.
pub const DEFAULT_PAYLOAD: &str = "strawberry_pie.jpg";

/// The first error is fatal; the driver performs no retries and returns
/// no partial results.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to read payload: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// One codec/direction measurement.
#[derive(Debug, Clone)]
pub struct Measurement {
    /// Display label, e.g. `"CBOR encoding"`.
    pub label: String,
    /// Per-run wall-clock durations in milliseconds.
    pub times_ms: Vec<f64>,
    /// Encoded output size in bytes; `None` for decode runs.
    pub size: Option<usize>,
}

/// Runs `op` the given number of times (at least once), recording each
/// run's wall-clock duration in milliseconds on a monotonic clock.
/// Returns the last result and all samples.
pub fn time_runs<T, E>(
    runs: usize,
    mut op: impl FnMut() -> Result<T, E>,
) -> Result<(T, Vec<f64>), E> {
    let mut times = Vec::with_capacity(runs.max(1));
    let t0 = Instant::now();
    let mut result = op()?;
    times.push(t0.elapsed().as_secs_f64() * 1e3);
    for _ in 1..runs {
        let t0 = Instant::now();
        result = op()?;
        times.push(t0.elapsed().as_secs_f64() * 1e3);
    }
    Ok((result, times))
}

/// Median of a sample: the middle sorted value, the average of the two
/// middles for even counts, and `0.0` for an empty sample.
pub fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let half = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[half]
    } else {
        (sorted[half - 1] + sorted[half]) / 2.0
    }
}

/// Wraps the payload in the benchmark record and times encode then decode
/// for every format, `runs` times each. Encode measurements for all
/// formats come first, then decode measurements, in format order.
pub fn run_benchmark(payload: &[u8], runs: usize) -> Result<Vec<Measurement>, BenchError> {
    let record = Value::Object(vec![
        ("name".to_owned(), Value::Str("Strawberry Pie".to_owned())),
        ("jpeg_data".to_owned(), Value::Bytes(payload.to_vec())),
    ]);

    let formats = [Format::Json, Format::Cbor];
    let mut codecs: Vec<_> = formats.iter().map(|f| f.new_codec()).collect();

    let mut measurements = Vec::with_capacity(formats.len() * 2);
    let mut encoded = Vec::with_capacity(formats.len());
    for codec in codecs.iter_mut() {
        let (bytes, times_ms) = time_runs(runs, || codec.encode(&record))?;
        measurements.push(Measurement {
            label: format!("{} encoding", codec.name()),
            times_ms,
            size: Some(bytes.len()),
        });
        encoded.push(bytes);
    }
    for (codec, bytes) in codecs.iter_mut().zip(&encoded) {
        let (_, times_ms) = time_runs(runs, || codec.decode(bytes))?;
        measurements.push(Measurement {
            label: format!("{} decoding", codec.name()),
            times_ms,
            size: None,
        });
    }
    Ok(measurements)
}

/// Prints raw timings per measurement, then all medians.
pub fn write_report(out: &mut impl Write, measurements: &[Measurement]) -> io::Result<()> {
    for m in measurements {
        if let Some(size) = m.size {
            writeln!(out, "{} size: {} bytes", m.label, size)?;
        }
        writeln!(out, "{} times (in ms):", m.label)?;
        writeln!(out, "{:?}", m.times_ms)?;
    }
    for m in measurements {
        writeln!(out, "Median {} time: {}", m.label, median(&m.times_ms))?;
    }
    Ok(())
}

/// Loads the payload, runs the full benchmark, and reports to stdout.
pub fn run(path: &str) -> Result<(), BenchError> {
    let payload = std::fs::read(path)?;
    let measurements = run_benchmark(&payload, RUNS)?;
    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &measurements)?;
    Ok(())
}
