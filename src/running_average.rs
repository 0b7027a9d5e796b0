use std::fmt;

use num_traits::{Num, NumCast};

use crate::Error;

/// O(1) running average over the last `N` values added.
///
/// The first value added seeds every slot of the window, so the average is
/// meaningful right away instead of being dragged towards zero while the window
/// fills up. Before anything has been added the average is zero.
#[derive(Clone, Debug)]
pub struct RunningAverage<T, const N: usize> {
    values: [T; N],
    index: usize,
    sum: T,
    divisor: T,
    initialized: bool,
}

impl<T, const N: usize> RunningAverage<T, N>
where
    T: Copy + Num + NumCast,
{
    const NON_EMPTY: () = assert!(N > 0, "running average window must hold at least one value");

    /// Creates an empty running average.
    ///
    /// Fails if `N` can't be represented in `T`, e.g. a window of 300 over `u8`.
    pub fn new() -> Result<Self, Error> {
        let () = Self::NON_EMPTY;

        let divisor = T::from(N).ok_or(Error::WindowOutOfRange(N))?;
        Ok(Self {
            values: [T::zero(); N],
            index: 0,
            sum: T::zero(),
            divisor,
            initialized: false,
        })
    }

    /// Pushes a value into the window, the first one fills every slot.
    pub fn add(&mut self, value: T) {
        if self.initialized {
            self.sum = self.sum + value - self.values[self.index];
            self.values[self.index] = value;
        } else {
            self.values = [value; N];
            self.sum = self.divisor * value;
            self.initialized = true;
        }
        self.index = (self.index + 1) % N;
    }

    /// Average of the values in the window, truncated for integer types.
    pub fn get(&self) -> T {
        self.sum / self.divisor
    }

    /// Forgets every value, the next [`add`](Self::add) seeds the window again.
    pub fn reset(&mut self) {
        self.values = [T::zero(); N];
        self.index = 0;
        self.sum = T::zero();
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Slot the next value will overwrite.
    pub fn cursor(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> T {
        self.sum
    }

    pub const fn window(&self) -> usize {
        N
    }
}

impl<T, const N: usize> fmt::Display for RunningAverage<T, N>
where
    T: Copy + Num + NumCast + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(index={},total={},average={})",
            self.index,
            self.sum,
            self.get()
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn first_value_seeds_window() {
        let mut avg = RunningAverage::<i32, 4>::new().unwrap();
        assert!(!avg.is_initialized());
        avg.add(7);
        assert!(avg.is_initialized());
        assert_eq!(avg.get(), 7);
        assert_eq!(avg.total(), 28);
        assert_eq!(avg.cursor(), 1);
    }

    #[test]
    fn zero_before_first_value() {
        let avg = RunningAverage::<f32, 5>::new().unwrap();
        assert_eq!(avg.get(), 0.0);
        assert_eq!(avg.get(), avg.get());
    }

    #[test]
    fn integer_window_of_three() {
        let mut avg = RunningAverage::<i64, 3>::new().unwrap();
        avg.add(2);
        assert_eq!((avg.total(), avg.get()), (6, 2));
        avg.add(4);
        assert_eq!((avg.total(), avg.get()), (8, 2));
        avg.add(6);
        assert_eq!((avg.total(), avg.get()), (12, 4));
        avg.add(10);
        assert_eq!((avg.total(), avg.get()), (20, 6));
    }

    #[test]
    fn float_window_of_three() {
        let mut avg = RunningAverage::<f64, 3>::new().unwrap();
        avg.add(2.0);
        assert_relative_eq!(avg.get(), 2.0);
        avg.add(4.0);
        assert_relative_eq!(avg.get(), 8.0 / 3.0);
        avg.add(6.0);
        assert_relative_eq!(avg.get(), 4.0);
        avg.add(10.0);
        assert_relative_eq!(avg.get(), 20.0 / 3.0);
    }

    #[test]
    fn old_values_slide_out() {
        let mut avg = RunningAverage::<i32, 3>::new().unwrap();
        for v in [100, -50, 9, 1, 2, 3] {
            avg.add(v);
        }
        assert_eq!(avg.total(), 6);
        assert_eq!(avg.get(), 2);
    }

    #[test]
    fn get_is_idempotent_after_wrapping() {
        let mut avg = RunningAverage::<f64, 3>::new().unwrap();
        for v in [0.5, 1.25, -7.0, 3.0, 9.75] {
            avg.add(v);
        }
        let first = avg.get();
        assert_eq!(avg.get(), first);
        assert_eq!(avg.get(), first);
        assert_eq!(avg.cursor(), 2);
        assert_relative_eq!(first, (-7.0 + 3.0 + 9.75) / 3.0);
    }

    #[test]
    fn cursor_wraps_every_window() {
        let mut avg = RunningAverage::<u32, 4>::new().unwrap();
        let mut seen = vec![];
        for v in 0..9 {
            avg.add(v);
            seen.push(avg.cursor());
        }
        assert_eq!(seen, [1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn window_of_one_passes_through() {
        let mut avg = RunningAverage::<f32, 1>::new().unwrap();
        for v in [3.5, -1.0, 42.0] {
            avg.add(v);
            assert_eq!(avg.get(), v);
            assert_eq!(avg.cursor(), 0);
        }
    }

    #[test]
    fn reset_seeds_again() {
        let mut avg = RunningAverage::<i32, 2>::new().unwrap();
        avg.add(10);
        avg.add(20);
        avg.reset();
        assert!(!avg.is_initialized());
        assert_eq!((avg.get(), avg.cursor()), (0, 0));
        avg.add(-4);
        assert_eq!(avg.get(), -4);
    }

    #[test]
    fn window_must_fit_value_type() {
        assert!(matches!(
            RunningAverage::<u8, 300>::new(),
            Err(Error::WindowOutOfRange(300))
        ));
        assert_eq!(RunningAverage::<u8, 255>::new().unwrap().window(), 255);
    }

    #[test]
    fn display_shows_cursor_total_and_average() {
        let mut avg = RunningAverage::<i32, 3>::new().unwrap();
        avg.add(2);
        avg.add(4);
        assert_eq!(avg.to_string(), "(index=2,total=8,average=2)");
    }
}
