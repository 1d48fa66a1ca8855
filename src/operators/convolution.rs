//! Discrete causal convolution as a lower-triangular Toeplitz operator.

use ndarray::{Array1, Array2, ArrayView1};

/// `C[i][j] = kernel[i-j]` for `i >= j`, zero above the diagonal.
///
/// Only the kernel is stored: the dense `n x n` matrix is materialized on
/// request by [`ConvolutionMatrix::to_dense`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionMatrix {
    kernel: Array1<f64>,
}

#[allow(clippy::len_without_is_empty)]
impl ConvolutionMatrix {

    pub fn new(kernel: Array1<f64>) -> Self { Self { kernel } }

    pub fn kernel(&self) -> ArrayView1<f64> { self.kernel.view() }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize { self.kernel.len() }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i >= j { self.kernel[i - j] } else { 0.0 }
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.len();
        Array2::from_shape_fn((n, n), |(i, j)| self.get(i, j))
    }

    /// `result[i] = sum_{j <= i} kernel[i-j] * x[j]`
    ///
    /// # Panics
    /// Panics if `x` does not have the same length as the kernel.
    pub fn apply(&self, x: ArrayView1<f64>) -> Array1<f64> {
        let n = self.len();
        assert_eq!(x.len(), n, "convolution operand length does not match kernel length");
        Array1::from_shape_fn(n, |i| {
            (0..=i).map(|j| self.kernel[i - j] * x[j]).sum()
        })
    }
}

#[cfg(test)]
mod test_convolution {
    use super::*;
    use ndarray::array;
    use float_eq::assert_float_eq;
    use proptest::prelude::*;
    use proptest::collection::vec;

    fn kernels() -> impl Strategy<Value = Vec<f64>> {
        vec(-100.0..100.0_f64, 1..40)
    }

    proptest! {
        #[test]
        fn upper_triangle_is_zero_and_diagonal_is_first_kernel_element(kernel in kernels()) {
            let c = ConvolutionMatrix::new(Array1::from(kernel.clone())).to_dense();
            let n = kernel.len();
            for i in 0..n {
                prop_assert_eq!(c[[i, i]], kernel[0]);
                for j in i+1..n {
                    prop_assert_eq!(c[[i, j]], 0.0);
                }
            }
        }

        #[test]
        fn impulse_response_is_the_kernel(kernel in kernels()) {
            let n = kernel.len();
            let mut impulse = Array1::zeros(n);
            impulse[0] = 1.0;
            let c = ConvolutionMatrix::new(Array1::from(kernel.clone()));
            prop_assert_eq!(c.apply(impulse.view()).to_vec(), kernel);
        }

        #[test]
        fn apply_agrees_with_dense_product(kernel in kernels(), seed in -10.0..10.0_f64) {
            let n = kernel.len();
            let x = Array1::from_shape_fn(n, |i| seed * (i as f64).sin());
            let c = ConvolutionMatrix::new(Array1::from(kernel));
            let sparse = c.apply(x.view());
            let dense  = c.to_dense().dot(&x);
            assert_float_eq!(sparse.to_vec(), dense.to_vec(), abs_all <= 1e-9);
        }
    }

    #[test]
    fn small_hand_computed_convolution() {
        let c = ConvolutionMatrix::new(array![1.0, 2.0, 3.0]);
        assert_eq!(c.to_dense(), array![[1.0, 0.0, 0.0],
                                        [2.0, 1.0, 0.0],
                                        [3.0, 2.0, 1.0]]);
        // [1, 1, 1] * [1, 2, 3] => running sums of the kernel
        let y = c.apply(array![1.0, 1.0, 1.0].view());
        assert_eq!(y, array![1.0, 3.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn operand_of_wrong_length() {
        ConvolutionMatrix::new(array![1.0, 2.0]).apply(array![1.0].view());
    }
}
