//! Conversion between the parameters the models are fitted with and the
//! physiologically interpretable quantities reported to users.
//!
//! Model parameters are per second (the PET and AIF time axes are in
//! seconds). Reported quantities follow the clinical conventions: micro rate
//! constants per minute, and flows or uptake rates normalized to 100 g of
//! tissue, per minute.

use units::{g_ml, g_ml_, per_min, per_min_, per_s, per_s_, MassDensity};
use units::todo::{Ratef64, Ratiof64};
use crate::{Error, Result};

/// Molar mass of glucose / 10: turns mg/dL into mmol/L
pub const GLUCOSE_MG_DL_PER_MMOL_L: f64 = 18.0156;

/// Subject-specific constants needed to turn fitted rates into reported
/// metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physiology {
    density: MassDensity,
    plasma_glucose: Option<f64>,
    lumped_constant: Ratiof64,
}

impl Default for Physiology {
    fn default() -> Self {
        Self { density: g_ml(1.05), plasma_glucose: None, lumped_constant: 0.81 }
    }
}

impl Physiology {

    /// `density` in g/mL; plasma glucose `ca` in mg/dL, where 0 means
    /// "not measured" and disables the CMRglc metric.
    pub fn new(density: f64, ca: f64, lumped_constant: Ratiof64) -> Result<Self> {
        fn invalid(option: &'static str, value: f64, reason: &'static str) -> Error {
            Error::InvalidOption { option, value: value.to_string(), reason }
        }
        if !(density.is_finite() && density > 0.0) {
            return Err(invalid("density", density, "must be positive and finite"))
        }
        if !(lumped_constant.is_finite() && lumped_constant > 0.0) {
            return Err(invalid("lc", lumped_constant, "must be positive and finite"))
        }
        if !(ca.is_finite() && ca >= 0.0) {
            return Err(invalid("ca", ca, "must be finite and not negative"))
        }
        let plasma_glucose = if ca == 0.0 { None } else { Some(ca) };
        Ok(Self { density: g_ml(density), plasma_glucose, lumped_constant })
    }

    pub fn density        (&self) -> MassDensity  { self.density }
    pub fn plasma_glucose (&self) -> Option<f64>  { self.plasma_glucose }
    pub fn lumped_constant(&self) -> Ratiof64     { self.lumped_constant }

    /// Per-second rate per mL of tissue -> per minute per 100 g of tissue
    pub fn per_100g_per_min(&self, rate: Ratef64) -> f64 {
        per_min_(per_s(rate)) * 100.0 / g_ml_(self.density)
    }

    /// Inverse of `per_100g_per_min`
    pub fn per_ml_per_s(&self, reported: f64) -> Ratef64 {
        per_s_(per_min(reported)) * g_ml_(self.density) / 100.0
    }
}

/// Cerebral blood flow (mL blood / 100 g tissue / min) from a per-second
/// clearance rate.
pub fn cbf(k2: Ratef64, physiology: &Physiology) -> f64 {
    physiology.per_100g_per_min(k2)
}

/// Cerebral metabolic rate of glucose from the reported net uptake rate
/// `ki` (mL / 100 g / min). `None` when plasma glucose was not measured.
pub fn cmrglc(ki: f64, physiology: &Physiology) -> Option<f64> {
    physiology.plasma_glucose
        .map(|ca| ki * ca / GLUCOSE_MG_DL_PER_MMOL_L / physiology.lumped_constant)
}

/// Micro rate constants of the two-tissue model, in reporting units: `k1` in
/// mL / 100 g / min, the others per minute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicroRates {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub k4: f64,
}

impl MicroRates {
    /// Net irreversible uptake rate
    pub fn ki(&self) -> f64 { self.k1 * self.k3 / (self.k2 + self.k3) }
    /// Total volume of distribution
    pub fn vt(&self) -> f64 { self.k1 / self.k2 * (1.0 + self.k3 / self.k4) }
}

/// The two-tissue model's impulse response written as a sum of two
/// exponentials, the form in which it is fitted. Rates per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiExponential {
    pub vb: Ratiof64,
    pub alpha_1: Ratef64,
    pub alpha_2: Ratef64,
    pub beta_1: Ratef64,
    pub beta_2: Ratef64,
}

impl BiExponential {

    pub fn rates(&self, physiology: &Physiology) -> MicroRates {
        let &Self { vb, alpha_1: a1, alpha_2: a2, beta_1: b1, beta_2: b2 } = self;
        let k1 = physiology.per_100g_per_min((a1 + a2) / (1.0 - vb));
        let k2 = (a1 * b1 + a2 * b2) / (a1 + a2);
        let k4 = b1 * b2 / k2;
        let k3 = b1 + b2 - k2 - k4;
        let per_minute = |k| per_min_(per_s(k));
        MicroRates { k1, k2: per_minute(k2), k3: per_minute(k3), k4: per_minute(k4) }
    }

    /// Inverse of `rates`.
    ///
    /// The result is not finite when the two exponents coincide (`k3 = 0`
    /// and `k2 = k4`).
    pub fn from_rates(vb: Ratiof64, rates: &MicroRates, physiology: &Physiology) -> Self {
        let per_second = |k| per_s_(per_min(k));
        let (k2, k3, k4) = (per_second(rates.k2), per_second(rates.k3), per_second(rates.k4));
        let k1 = physiology.per_ml_per_s(rates.k1) * (1.0 - vb);

        let sum = k2 + k3 + k4;
        let discriminant = (sum * sum - 4.0 * k2 * k4).sqrt();
        let beta_1 = (sum - discriminant) / 2.0;
        let beta_2 = (sum + discriminant) / 2.0;
        let spread = beta_2 - beta_1;
        let alpha_1 = k1 * (k3 + k4 - beta_1) / spread;
        let alpha_2 = k1 * (beta_2 - k3 - k4) / spread;
        Self { vb, alpha_1, alpha_2, beta_1, beta_2 }
    }
}
