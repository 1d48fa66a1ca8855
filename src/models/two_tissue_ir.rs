//! Irreversible two-tissue compartment model (`k4 = 0`), parametrized by
//! the influx `K1`, the net uptake rate `Ki` and `k_sum = k2 + k3`:
//!
//! ```text
//! e      = exp(-k_sum t)
//! C_T(t) = K1 * (AIF (x) e) + Ki * (AIF (x) (1 - e))
//! PET(t) = (1 - vB) * C_T(t) + vB * AIF(t)
//! ```

use ndarray::{array, Array1};

use crate::{
    Result,
    aif::AifOperators,
    layout::{ParameterLayout, ParameterSpec, Transform},
    rates::{cmrglc, Physiology},
};
use super::{unknown_output, KineticModel, ModelOptions};

pub const NAME: &str = "pet_2TCM_IR";
pub const DESCRIPTION: &str = "PET irreversible two tissue compartment model";

const VB   : usize = 0;
const K1   : usize = 1;
const KI   : usize = 2;
const K_SUM: usize = 3;

#[derive(Debug, Clone)]
pub struct TwoTissueIrreversible {
    aif: AifOperators,
    layout: ParameterLayout,
    physiology: Physiology,
}

impl TwoTissueIrreversible {

    pub fn new(options: &ModelOptions, aif: AifOperators) -> Self {
        let seeds = &options.seeds;
        let layout = ParameterLayout::new(vec![
            ParameterSpec::seeded("vB"   , seeds.vb   , Transform::Fractional),
            ParameterSpec::seeded("K1"   , seeds.k1   , Transform::Log),
            ParameterSpec::seeded("Ki"   , seeds.ki   , Transform::Log),
            ParameterSpec::seeded("k-sum", seeds.k_sum, Transform::Log),
        ]);
        Self { aif, layout, physiology: options.physiology }
    }

    pub fn boxed(options: &ModelOptions, aif: AifOperators) -> Box<dyn KineticModel> {
        Box::new(Self::new(options, aif))
    }
}

impl KineticModel for TwoTissueIrreversible {

    fn name       (&self) -> &'static str      { NAME }
    fn description(&self) -> &'static str      { DESCRIPTION }
    fn layout     (&self) -> &ParameterLayout  { &self.layout }
    fn aif        (&self) -> &AifOperators     { &self.aif }

    fn signal(&self, params: &[f64]) -> Array1<f64> {
        let (vb, k1, ki, k_sum) = (params[VB], params[K1], params[KI], params[K_SUM]);
        let decay = self.aif.exponential_kernel(k_sum);
        let exchangeable = self.aif.response(&decay);
        let trapped      = self.aif.response(&decay.mapv(|e| 1.0 - e));
        (exchangeable * k1 + trapped * ki) * (1.0 - vb) + &self.aif.aif_pet() * vb
    }

    /// CMRglc is reported only if plasma glucose was measured.
    fn outputs(&self) -> Vec<&'static str> {
        match self.physiology.plasma_glucose() {
            Some(_) => vec!["CMRglc"],
            None    => vec![],
        }
    }

    fn metrics(&self, params: &[f64], key: &str) -> Result<Array1<f64>> {
        self.layout.check(params);
        if key != "CMRglc" { return Err(unknown_output(NAME, key)) }
        let ki = self.physiology.per_100g_per_min(params[KI]);
        cmrglc(ki, &self.physiology)
            .map(|value| array![value])
            .ok_or_else(|| unknown_output(NAME, key))
    }
}
