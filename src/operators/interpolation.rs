//! Piecewise-linear resampling between two time grids, as a matrix.

use ndarray::{Array1, Array2, ArrayView1};
use serde::Deserialize;

use crate::{Error, Result, series::TimeGrid, operators::ConvolutionMatrix};

/// What to do with target points which lie outside the source grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Continue the first/last source interval's straight line. Before the
    /// first sample of a rising curve this goes negative.
    #[default]
    Linear,
    /// Hold the first/last source value
    Clamp,
    /// Refuse: `Error::OutOfRange`
    Error,
}

/// The two non-zero entries of one row of the interpolation matrix.
///
/// `value(x') = w_lo * x[lo] + w_hi * x[hi]`. When the source grid has a
/// single point, `lo == hi` and `w_hi == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub lo: usize,
    pub hi: usize,
    pub w_lo: f64,
    pub w_hi: f64,
}

/// Sparse `m x n` matrix mapping values sampled on an `n`-point source grid
/// to an `m`-point target grid.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationMatrix {
    n_source: usize,
    rows: Vec<Row>,
}

impl InterpolationMatrix {

    /// The source grid is validated (strictly increasing) by `TimeGrid`, so no
    /// interval has zero width.
    pub fn new(source: &TimeGrid, target: ArrayView1<f64>, extrapolation: Extrapolation) -> Result<Self> {
        let x = source.as_slice();
        let n = x.len();
        let (low, high) = (source.first(), source.last());
        let rows = target.iter().map(|&t| {
            let outside = t < low || t > high;
            if outside && extrapolation == Extrapolation::Error {
                return Err(Error::OutOfRange { target: t, low, high })
            }
            if n == 1 {
                return Ok(Row { lo: 0, hi: 0, w_lo: 1.0, w_hi: 0.0 })
            }
            if outside && extrapolation == Extrapolation::Clamp {
                let i = if t < low { 0 } else { n - 1 };
                return Ok(Row { lo: i, hi: i, w_lo: 1.0, w_hi: 0.0 })
            }
            // Index of the last source point <= t, kept inside [0, n-2] so
            // that boundary intervals get reused beyond the ends.
            let lo = x.partition_point(|&xi| xi <= t)
                .saturating_sub(1)
                .min(n - 2);
            let hi = lo + 1;
            let mu = (t - x[lo]) / (x[hi] - x[lo]);
            Ok(Row { lo, hi, w_lo: 1.0 - mu, w_hi: mu })
        }).collect::<Result<Vec<_>>>()?;
        Ok(Self { n_source: n, rows })
    }

    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn source_len(&self) -> usize { self.n_source }
    pub fn target_len(&self) -> usize { self.rows.len() }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.target_len(), self.source_len()));
        for (i, &Row { lo, hi, w_lo, w_hi }) in self.rows.iter().enumerate() {
            dense[[i, lo]] += w_lo;
            dense[[i, hi]] += w_hi;
        }
        dense
    }

    /// Resample `x`, given on the source grid, onto the target grid.
    ///
    /// # Panics
    /// Panics if `x` does not match the source grid length.
    pub fn apply(&self, x: ArrayView1<f64>) -> Array1<f64> {
        assert_eq!(x.len(), self.n_source, "interpolation operand length does not match source grid");
        self.rows.iter()
            .map(|&Row { lo, hi, w_lo, w_hi }| w_lo * x[lo] + w_hi * x[hi])
            .collect()
    }

    /// The product `self x conv`, without materializing `conv`.
    ///
    /// Each row of `self` has two non-zero weights, so row `i` of the product
    /// is a weighted sum of two rows of the convolution matrix: `O(m n)`
    /// rather than `O(m n^2)`.
    ///
    /// # Panics
    /// Panics if `conv` does not match the source grid length.
    pub fn compose(&self, conv: &ConvolutionMatrix) -> Array2<f64> {
        let n = self.n_source;
        assert_eq!(conv.len(), n, "convolution matrix does not match interpolation source grid");
        let mut product = Array2::zeros((self.target_len(), n));
        for (mut out, &Row { lo, hi, w_lo, w_hi }) in product.rows_mut().into_iter().zip(&self.rows) {
            for j in 0..=hi {
                out[j] = w_lo * conv.get(lo, j) + w_hi * conv.get(hi, j);
            }
        }
        product
    }
}
