//! Line oriented driver feeding sensor readings through a [`RunningAverage`].

use std::io::{self, BufRead, Write};

use log::{debug, warn};

use crate::RunningAverage;

#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    /// Decimal places of the written averages.
    pub precision: usize,
    /// Append the averager's diagnostic rendering to every output line.
    pub diagnostics: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            precision: 3,
            diagnostics: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StreamSummary {
    pub accepted: usize,
    pub skipped: usize,
    pub last: Option<f64>,
}

/// Reads one reading per line from `input` and writes the smoothed value for each to `output`.
///
/// Blank lines and `#` comments are ignored. Lines that don't parse as a number, or parse to
/// NaN or an infinity, are skipped since they would poison the running sum for good.
pub fn smooth_stream<R, W, const N: usize>(
    input: R,
    mut output: W,
    avg: &mut RunningAverage<f64, N>,
    options: StreamOptions,
) -> io::Result<StreamSummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = StreamSummary::default();

    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let reading = match line.parse::<f64>() {
            Ok(reading) if reading.is_finite() => reading,
            Ok(reading) => {
                warn!("Skipping line {}: non-finite reading {reading}", lineno + 1);
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("Skipping line {}: '{line}' ({e})", lineno + 1);
                summary.skipped += 1;
                continue;
            }
        };

        avg.add(reading);
        let smoothed = avg.get();
        debug!("{reading} -> {avg}");

        if options.diagnostics {
            writeln!(output, "{:.*}\t{avg}", options.precision, smoothed)?;
        } else {
            writeln!(output, "{:.*}", options.precision, smoothed)?;
        }

        summary.accepted += 1;
        summary.last = Some(smoothed);
    }

    output.flush()?;
    Ok(summary)
}
