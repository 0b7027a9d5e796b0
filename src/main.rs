mod config;

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
    process::exit,
};

use clap::Parser;
use log::{error, info};
use smooth::{
    stream::{smooth_stream, StreamOptions, StreamSummary},
    Error, RunningAverage,
};

use crate::config::Config;

#[derive(Parser, Debug)]
struct Args {
    /// File with one reading per line, reads stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of readings to average over (1, 2, 4, 8, 16, 32 or 64)
    #[arg(short, long)]
    window: Option<usize>,

    /// Decimal places of the smoothed output
    #[arg(short, long)]
    precision: Option<usize>,

    /// Print the averager state next to every smoothed value
    #[arg(short, long)]
    diagnostics: bool,

    /// TOML file providing defaults for the options above
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn run<const N: usize>(
    input: impl BufRead,
    output: impl Write,
    options: StreamOptions,
) -> io::Result<StreamSummary> {
    let mut avg = RunningAverage::<f64, N>::new()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    smooth_stream(input, output, &mut avg, options)
}

/// Picks the monomorphized averager for a window chosen at runtime.
fn dispatch(
    window: usize,
    input: impl BufRead,
    output: impl Write,
    options: StreamOptions,
) -> Result<io::Result<StreamSummary>, Error> {
    Ok(match window {
        1 => run::<1>(input, output, options),
        2 => run::<2>(input, output, options),
        4 => run::<4>(input, output, options),
        8 => run::<8>(input, output, options),
        16 => run::<16>(input, output, options),
        32 => run::<32>(input, output, options),
        64 => run::<64>(input, output, options),
        n => return Err(Error::InvalidWindow(n)),
    })
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            error!("Failed to load config '{}': {e}", path.display());
            exit(1);
        }),
        None => Config::default(),
    };

    let (window, options) = config.resolve(args.window, args.precision, args.diagnostics);

    info!(
        "Smoothing over a window of {window} readings (precision {}, diagnostics {})",
        options.precision, options.diagnostics,
    );

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                error!("Failed to open input '{}': {e}", path.display());
                exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let summary = dispatch(window, input, io::stdout().lock(), options)
        .unwrap_or_else(|e| {
            error!("{e}");
            exit(1);
        })
        .unwrap_or_else(|e| {
            error!("Failed to smooth readings: {e}");
            exit(1);
        });

    info!(
        "Smoothed {} readings, skipped {}, last average {:?}",
        summary.accepted, summary.skipped, summary.last,
    );
}
