//! Last line of defence between a kinetic equation and the inference
//! engine: a non-finite prediction must never reach the optimizer.

use ndarray::Array1;
use tracing::warn;

/// Return `curve` unchanged if every element is finite; otherwise log the
/// offending curve together with the parameters that produced it and return
/// zeros of the same length.
pub fn finite_or_zeros(curve: Array1<f64>, params: &[f64]) -> Array1<f64> {
    if curve.iter().all(|v| v.is_finite()) { return curve }
    warn!(?curve, ?params, "NaN or inf in predicted curve: replaced by zeros");
    Array1::zeros(curve.len())
}
