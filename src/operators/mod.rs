//! Linear operators from which every model's response is assembled.
//!
//! Both are built once, when a model is initialized; evaluation only
//! multiplies by their (precomputed) product.

pub use convolution::ConvolutionMatrix;
pub use interpolation::{Extrapolation, InterpolationMatrix, Row};

pub mod convolution;
pub mod interpolation;
