//! One-tissue compartment model: tracer exchanges between plasma and a
//! single tissue pool.
//!
//! ```text
//! C_T(t)   = K1 * (AIF (x) exp(-k2 t))
//! PET(t)   = (1 - vB) * C_T(t) + vB * AIF(t)
//! ```

use ndarray::{array, Array1};

use crate::{
    Result,
    aif::AifOperators,
    layout::{ParameterLayout, ParameterSpec, Transform},
    rates::{cbf, Physiology},
};
use super::{unknown_output, KineticModel, ModelOptions};

pub const NAME: &str = "pet_1TCM";
pub const DESCRIPTION: &str = "PET one tissue compartment model";

const VB: usize = 0;
const K1: usize = 1;
const K2: usize = 2;

#[derive(Debug, Clone)]
pub struct OneTissue {
    aif: AifOperators,
    layout: ParameterLayout,
    physiology: Physiology,
}

impl OneTissue {

    pub fn new(options: &ModelOptions, aif: AifOperators) -> Self {
        let seeds = &options.seeds;
        let layout = ParameterLayout::new(vec![
            ParameterSpec::seeded("vB", seeds.vb, Transform::Fractional),
            ParameterSpec::seeded("K1", seeds.k1, Transform::Log),
            ParameterSpec::seeded("k2", seeds.k2, Transform::Log),
        ]);
        Self { aif, layout, physiology: options.physiology }
    }

    pub fn boxed(options: &ModelOptions, aif: AifOperators) -> Box<dyn KineticModel> {
        Box::new(Self::new(options, aif))
    }
}

impl KineticModel for OneTissue {

    fn name       (&self) -> &'static str      { NAME }
    fn description(&self) -> &'static str      { DESCRIPTION }
    fn layout     (&self) -> &ParameterLayout  { &self.layout }
    fn aif        (&self) -> &AifOperators     { &self.aif }

    fn signal(&self, params: &[f64]) -> Array1<f64> {
        let (vb, k1, k2) = (params[VB], params[K1], params[K2]);
        let tissue = self.aif.exponential_response(k2) * k1;
        tissue * (1.0 - vb) + &self.aif.aif_pet() * vb
    }

    fn outputs(&self) -> Vec<&'static str> { vec!["CBF"] }

    fn metrics(&self, params: &[f64], key: &str) -> Result<Array1<f64>> {
        self.layout.check(params);
        match key {
            "CBF" => Ok(array![cbf(params[K2], &self.physiology)]),
            _     => Err(unknown_output(NAME, key)),
        }
    }
}
