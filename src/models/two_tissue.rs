//! Reversible two-tissue compartment model, fitted in its bi-exponential
//! form:
//!
//! ```text
//! PET(t) = vB * AIF(t) + alpha_1 * (AIF (x) exp(-beta_1 t))
//!                      + alpha_2 * (AIF (x) exp(-beta_2 t))
//! ```
//!
//! The micro rate constants `K1 .. k4` are recovered on demand through the
//! `rates` metric.

use ndarray::Array1;

use crate::{
    Result,
    aif::AifOperators,
    layout::{ParameterLayout, ParameterSpec, Transform},
    rates::{cmrglc, BiExponential, Physiology},
};
use super::{unknown_output, KineticModel, ModelOptions};

pub const NAME: &str = "pet_2TCM";
pub const DESCRIPTION: &str = "PET reversible two tissue compartment model";

#[derive(Debug, Clone)]
pub struct TwoTissue {
    aif: AifOperators,
    layout: ParameterLayout,
    physiology: Physiology,
}

impl TwoTissue {

    pub fn new(options: &ModelOptions, aif: AifOperators) -> Self {
        let seeds = &options.seeds;
        let layout = ParameterLayout::new(vec![
            ParameterSpec::seeded("vB"     , seeds.vb     , Transform::Fractional),
            ParameterSpec::seeded("alpha-1", seeds.alpha_1, Transform::Log),
            ParameterSpec::seeded("alpha-2", seeds.alpha_2, Transform::Log),
            ParameterSpec::seeded("beta-1" , seeds.beta_1 , Transform::Log),
            ParameterSpec::seeded("beta-2" , seeds.beta_2 , Transform::Log),
        ]);
        Self { aif, layout, physiology: options.physiology }
    }

    pub fn boxed(options: &ModelOptions, aif: AifOperators) -> Box<dyn KineticModel> {
        Box::new(Self::new(options, aif))
    }

    fn bi_exponential(params: &[f64]) -> BiExponential {
        let &[vb, alpha_1, alpha_2, beta_1, beta_2] = params else {
            unreachable!("length checked against layout")
        };
        BiExponential { vb, alpha_1, alpha_2, beta_1, beta_2 }
    }
}

impl KineticModel for TwoTissue {

    fn name       (&self) -> &'static str      { NAME }
    fn description(&self) -> &'static str      { DESCRIPTION }
    fn layout     (&self) -> &ParameterLayout  { &self.layout }
    fn aif        (&self) -> &AifOperators     { &self.aif }

    fn signal(&self, params: &[f64]) -> Array1<f64> {
        let BiExponential { vb, alpha_1, alpha_2, beta_1, beta_2 } = Self::bi_exponential(params);
        self.aif.exponential_response(beta_1) * alpha_1
            + self.aif.exponential_response(beta_2) * alpha_2
            + &self.aif.aif_pet() * vb
    }

    fn outputs(&self) -> Vec<&'static str> { vec!["rates"] }

    /// `rates`: `[K1, k2, k3, k4, Ki, Vt]`, followed by CMRglc when plasma
    /// glucose is known.
    fn metrics(&self, params: &[f64], key: &str) -> Result<Array1<f64>> {
        self.layout.check(params);
        if key != "rates" { return Err(unknown_output(NAME, key)) }
        let rates = Self::bi_exponential(params).rates(&self.physiology);
        let ki = rates.ki();
        Ok([rates.k1, rates.k2, rates.k3, rates.k4, ki, rates.vt()].into_iter()
           .chain(cmrglc(ki, &self.physiology))
           .collect())
    }
}

#[cfg(test)]
mod test_two_tissue {
    use super::*;
    use super::super::{OneTissue, test_support::*};
    use crate::{Error, rates::MicroRates};
    use float_eq::assert_float_eq;
    use rstest::rstest;

    fn model_with(physiology: Physiology) -> TwoTissue {
        TwoTissue::new(&ModelOptions { physiology, ..ModelOptions::default() }, aif_on_pet_grid())
    }

    fn model() -> TwoTissue { model_with(Physiology::default()) }

    #[test]
    fn pure_blood_reproduces_the_aif() {
        let curve = model().evaluate(&[1.0, 0.0, 0.0, 0.1, 0.2]);
        assert_float_eq!(curve.to_vec(), AIF.to_vec(), abs_all <= 1e-12);
    }

    #[test]
    fn single_non_decaying_exponential_integrates_the_aif() {
        let curve = model().evaluate(&[0.0, 1.0, 0.0, 0.0, 0.3]);
        assert_float_eq!(curve.to_vec(), cumulative_aif(), abs_all <= 1e-12);
    }

    // With k3 = 0 nothing reaches the second tissue pool: a single exponential
    // with alpha_1 = K1 (1 - vB), beta_1 = k2 remains.
    #[test]
    fn collapses_to_one_tissue_model() {
        let (vb, k1, k2) = (0.04, 0.07, 0.03);
        let one = OneTissue::new(&ModelOptions::default(), aif_on_pet_grid()).evaluate(&[vb, k1, k2]);
        let two = model().evaluate(&[vb, k1 * (1.0 - vb), 0.0, k2, 0.5]);
        assert_float_eq!(one.to_vec(), two.to_vec(), abs_all <= 1e-12);
    }

    #[rstest(/**/               params                      ,
             case([f64::NAN, 0.001, 0.001, 0.0001, 0.001   ]),
             case([0.03, 0.001, f64::INFINITY, 0.0001, 0.001]),
             case([0.03, 0.001, 0.001, -1e4, 0.001         ]),
    )]
    fn non_finite_curves_become_zeros(params: [f64; 5]) {
        assert_eq!(model().evaluate(&params).to_vec(), vec![0.0; 10]);
    }

    #[test]
    fn rates_metric() {
        let physiology = Physiology::default();
        let truth = MicroRates { k1: 20.0, k2: 0.4, k3: 0.1, k4: 0.05 };
        let bi = BiExponential::from_rates(0.05, &truth, &physiology);
        let params = [bi.vb, bi.alpha_1, bi.alpha_2, bi.beta_1, bi.beta_2];
        let m = model();
        assert_eq!(m.outputs(), vec!["rates"]);
        let rates = m.evaluate_model(&params, "rates").unwrap();
        let expected = vec![20.0, 0.4, 0.1, 0.05, truth.ki(), truth.vt()];
        assert_float_eq!(rates.to_vec(), expected, r2nd_all <= 1e-9);
    }

    #[test]
    fn rates_metric_with_plasma_glucose() {
        let physiology = Physiology::new(1.05, 100.0, 0.81).unwrap();
        let truth = MicroRates { k1: 20.0, k2: 0.4, k3: 0.1, k4: 0.05 };
        let bi = BiExponential::from_rates(0.05, &truth, &physiology);
        let params = [bi.vb, bi.alpha_1, bi.alpha_2, bi.beta_1, bi.beta_2];
        let rates = model_with(physiology).metrics(&params, "rates").unwrap();
        assert_eq!(rates.len(), 7);
        assert_float_eq!(rates[6], truth.ki() * 100.0 / 18.0156 / 0.81, r2nd <= 1e-9);
    }

    #[test]
    fn unknown_metric() {
        let result = model().metrics(&[0.03, 0.001, 0.001, 0.0001, 0.001], "CBF");
        assert!(matches!(result, Err(Error::UnknownOutput { model: "pet_2TCM", .. })));
    }
}
