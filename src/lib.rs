//! Constant time sliding window averages for smoothing noisy sensor readings.

mod running_average;
pub mod stream;

use std::{error, fmt};

pub use running_average::RunningAverage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The window size is zero, or not one the caller knows how to build.
    InvalidWindow(usize),
    /// The window size can't be represented in the averaged value type.
    WindowOutOfRange(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidWindow(n) => write!(f, "invalid window size {n}"),
            Error::WindowOutOfRange(n) => {
                write!(f, "window size {n} does not fit in the value type")
            }
        }
    }
}

impl error::Error for Error {}
