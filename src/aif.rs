//! Everything a kinetic model needs to know about the arterial input
//! function, precomputed once when the model is initialized.
//!
//! Every model's tissue response is a combination of terms of the form
//!
//! ```text
//! AIF (x) exp(-k t)        (x) = causal convolution
//! ```
//!
//! sampled at the PET frame times. The AIF is typically sampled more finely
//! (and irregularly) than the PET frames, so the convolution is carried out
//! on a uniform kernel grid and the result is interpolated onto the PET
//! grid. Both steps are linear, so their product (the *combined operator*)
//! is computed once, after which each term costs a single matrix-vector
//! product.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::debug;

use units::todo::{Concentrationf64, Ratef64, Timef64};
use crate::{
    Error, Result,
    operators::{ConvolutionMatrix, Extrapolation, InterpolationMatrix},
    series::{check_finite, KernelGrid, TimeGrid},
};

/// Read-only AIF artifacts shared by all evaluations of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct AifOperators {
    /// `Interp(kernel grid -> PET grid) x Conv(AIF on kernel grid) x step`
    combined: Array2<f64>,
    /// Argument of the exponential kernels, starting at zero
    kernel_time: Array1<Timef64>,
    /// AIF at the PET frame times: the blood-volume contribution
    aif_pet: Array1<Concentrationf64>,
    step: Timef64,
}

impl AifOperators {

    /// If `aif_time` is given, the AIF is resampled onto a uniform grid whose
    /// spacing is the smallest gap in `aif_time`. Otherwise the AIF is taken
    /// to be sampled at `pet_time` already.
    ///
    /// `extrapolation` governs PET frames lying outside the AIF's time range.
    pub fn new(
        aif          : &[Concentrationf64],
        aif_time     : Option<&[Timef64]>,
        pet_time     : &[Timef64],
        extrapolation: Extrapolation,
    ) -> Result<Self> {
        if aif.is_empty() { return Err(Error::EmptySeries { series: "AIF" }) }
        check_finite("AIF", aif)?;
        let pet = TimeGrid::new("PET time", pet_time)?;
        match aif_time {
            Some(aif_time) => Self::resampled(aif, &TimeGrid::new("AIF time", aif_time)?, &pet, extrapolation),
            None           => Self::on_pet_grid(aif, &pet),
        }
    }

    fn resampled(aif: &[f64], aif_grid: &TimeGrid, pet: &TimeGrid, extrapolation: Extrapolation) -> Result<Self> {
        if aif.len() != aif_grid.len() {
            return Err(Error::LengthMismatch { series: "AIF", values: aif.len(), times: aif_grid.len() })
        }
        let step = aif_grid.min_step()?;
        let kernel = KernelGrid::covering(aif_grid.name(), aif_grid.first(), aif_grid.last(), step)?;
        let samples = TimeGrid::new("kernel grid", &kernel.sample_times().to_vec())?;
        let aif = ArrayView1::from(aif);

        // The last kernel sample may overshoot the final AIF sample by less
        // than one step: hold the last measured value there.
        let aif_kernel = InterpolationMatrix::new(aif_grid, samples.times(), Extrapolation::Clamp)?.apply(aif);
        let aif_pet    = InterpolationMatrix::new(aif_grid, pet    .times(), extrapolation       )?.apply(aif);
        let to_pet     = InterpolationMatrix::new(&samples, pet    .times(), extrapolation       )?;

        let combined = to_pet.compose(&ConvolutionMatrix::new(aif_kernel)) * step;
        debug!(step, kernel_samples = kernel.len(), pet_frames = pet.len(), "AIF resampled onto uniform kernel grid");
        Ok(Self { combined, kernel_time: kernel.lags(), aif_pet, step })
    }

    fn on_pet_grid(aif: &[f64], pet: &TimeGrid) -> Result<Self> {
        if aif.len() != pet.len() {
            return Err(Error::LengthMismatch { series: "AIF", values: aif.len(), times: pet.len() })
        }
        let step = pet.min_step()?;
        let aif_pet = Array1::from(aif.to_vec());
        let combined = ConvolutionMatrix::new(aif_pet.clone()).to_dense() * step;
        debug!(step, pet_frames = pet.len(), "AIF taken as sampled on the PET grid");
        Ok(Self { combined, kernel_time: pet.shifted_to_zero(), aif_pet, step })
    }

    pub fn combined   (&self) -> ArrayView2<f64>               { self.combined.view() }
    pub fn kernel_time(&self) -> ArrayView1<Timef64>           { self.kernel_time.view() }
    pub fn aif_pet    (&self) -> ArrayView1<Concentrationf64>  { self.aif_pet.view() }
    pub fn step       (&self) -> Timef64                       { self.step }

    /// Number of PET frames: the length of every predicted curve
    pub fn pet_len(&self) -> usize { self.aif_pet.len() }

    /// `exp(-rate * t)` on the kernel grid
    pub fn exponential_kernel(&self, rate: Ratef64) -> Array1<f64> {
        self.kernel_time.mapv(|t| (-rate * t).exp())
    }

    /// AIF convolved with `kernel` (given on the kernel grid), at the PET frame times.
    ///
    /// # Panics
    /// Panics if `kernel` is not sampled on the kernel grid.
    pub fn response(&self, kernel: &Array1<f64>) -> Array1<f64> {
        self.combined.dot(kernel)
    }

    /// AIF convolved with `exp(-rate * t)`, at the PET frame times.
    pub fn exponential_response(&self, rate: Ratef64) -> Array1<f64> {
        self.response(&self.exponential_kernel(rate))
    }
}
