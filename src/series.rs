//! Validated time axes: the measured AIF/PET sample times and the uniform
//! grid on which exponential kernels are evaluated.

use itertools::Itertools;
use ndarray::{Array1, ArrayView1};

use units::todo::Timef64;
use crate::{Error, Result};

/// Strictly increasing, finite, non-empty sequence of sample times.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    name: &'static str,
    times: Vec<Timef64>,
}

#[allow(clippy::len_without_is_empty)] // Never empty by construction
impl TimeGrid {

    /// `name` identifies the series in error messages.
    pub fn new(name: &'static str, times: &[Timef64]) -> Result<Self> {
        if times.is_empty() { return Err(Error::EmptySeries { series: name }) }
        check_finite(name, times)?;
        let decrease = times.iter()
            .tuple_windows()
            .find_position(|(previous, next)| next <= previous);
        if let Some((index, (&previous, &next))) = decrease {
            return Err(Error::NonIncreasing { series: name, index, previous, next })
        }
        Ok(Self { name, times: times.to_vec() })
    }

    pub fn name    (&self) -> &'static str          { self.name }
    pub fn times   (&self) -> ArrayView1<Timef64>   { ArrayView1::from(&self.times[..]) }
    pub fn as_slice(&self) -> &[Timef64]            { &self.times }
    pub fn len     (&self) -> usize                 { self.times.len() }
    pub fn first   (&self) -> Timef64               { self.times[0] }
    pub fn last    (&self) -> Timef64               { self.times[self.len() - 1] }

    /// Smallest gap between consecutive samples.
    pub fn min_step(&self) -> Result<Timef64> {
        let step = self.times.iter()
            .tuple_windows()
            .map(|(a, b)| b - a)
            .reduce(f64::min)
            .ok_or(Error::TooShort { series: self.name, len: self.len() })?;
        if step > 0.0 && step.is_finite() { Ok(step) }
        else { Err(Error::NonPositiveStep { series: self.name, step }) }
    }

    /// The same times, relative to the first sample.
    pub fn shifted_to_zero(&self) -> Array1<Timef64> {
        let first = self.first();
        self.times.iter().map(|t| t - first).collect()
    }
}

/// Reject NaN and infinities in raw input.
pub(crate) fn check_finite(series: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().find_position(|v| !v.is_finite()) {
        Some((index, &value)) => Err(Error::NonFinite { series, index, value }),
        None => Ok(()),
    }
}

// Absorb rounding in `range / step`, so that a range which is an exact
// multiple of the step does not gain a spurious extra sample.
const STEP_TOLERANCE: f64 = 1e-9;

/// Uniformly sampled time axis, used for evaluating exponential kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelGrid {
    start: Timef64,
    step: Timef64,
    len: usize,
}

impl KernelGrid {

    /// Smallest uniform grid starting at `start`, with spacing `step`, whose
    /// last sample is at or beyond `stop`.
    pub fn covering(series: &'static str, start: Timef64, stop: Timef64, step: Timef64) -> Result<Self> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(Error::NonPositiveStep { series, step })
        }
        let intervals = ((stop - start) / step - STEP_TOLERANCE).ceil().max(0.0) as usize;
        Ok(Self { start, step, len: intervals + 1 })
    }

    pub fn start(&self) -> Timef64 { self.start }
    pub fn step (&self) -> Timef64 { self.step }
    pub fn len  (&self) -> usize   { self.len }

    /// Absolute times of the samples: where the AIF gets resampled.
    pub fn sample_times(&self) -> Array1<Timef64> {
        let Self { start, step, len } = *self;
        Array1::from_shape_fn(len, |i| start + i as f64 * step)
    }

    /// Time elapsed since the first sample: the argument of the exponential
    /// kernels.
    pub fn lags(&self) -> Array1<Timef64> {
        let Self { step, len, .. } = *self;
        Array1::from_shape_fn(len, |i| i as f64 * step)
    }
}

#[cfg(test)]
mod test_time_grid {
    use super::*;
    use float_eq::assert_float_eq;
    use rstest::rstest;

    #[test]
    fn accepts_irregular_increasing_times() {
        let grid = TimeGrid::new("PET", &[0.0, 10.0, 15.0, 35.0]).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.first(), 0.0);
        assert_eq!(grid.last(), 35.0);
        assert_eq!(grid.min_step().unwrap(), 5.0);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(TimeGrid::new("AIF", &[]), Err(Error::EmptySeries { series: "AIF" })));
    }

    #[rstest(/**/      times         , bad_index,
             case(&[0.0, 1.0, 1.0, 2.0],        1), // duplicate timestamp
             case(&[0.0, 2.0, 1.0     ],        1), // decreasing
             case(&[5.0, 4.0          ],        0),
    )]
    fn non_increasing_times_are_rejected(times: &[f64], bad_index: usize) {
        match TimeGrid::new("AIF", times) {
            Err(Error::NonIncreasing { index, .. }) => assert_eq!(index, bad_index),
            other => panic!("expected NonIncreasing, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_times_are_rejected() {
        let result = TimeGrid::new("PET", &[0.0, f64::NAN, 2.0]);
        assert!(matches!(result, Err(Error::NonFinite { index: 1, .. })));
    }

    #[test]
    fn single_sample_has_no_step() {
        let grid = TimeGrid::new("PET", &[3.0]).unwrap();
        assert!(matches!(grid.min_step(), Err(Error::TooShort { len: 1, .. })));
    }

    #[test]
    fn shifted_to_zero() {
        let grid = TimeGrid::new("PET", &[30.0, 40.0, 60.0]).unwrap();
        let shifted = grid.shifted_to_zero();
        assert_float_eq!(shifted.to_vec(), vec![0.0, 10.0, 30.0], abs_all <= 0.0);
    }
}
