//! Compartmental kinetic models, and the name-keyed registry through which
//! hosts construct them.

pub mod one_tissue;
pub mod two_tissue;
pub mod two_tissue_ir;

pub use one_tissue::OneTissue;
pub use two_tissue::TwoTissue;
pub use two_tissue_ir::TwoTissueIrreversible;

use std::collections::BTreeMap;

use ndarray::Array1;
use serde::Deserialize;
use tracing::info;

use crate::{Error, Result, aif::AifOperators, guard::finite_or_zeros, layout::ParameterLayout, rates::Physiology};

/// The capability shared by all kinetic models.
///
/// A model exists only once its AIF operators have been built, is immutable
/// thereafter, and can be evaluated concurrently from any number of threads.
pub trait KineticModel: Send + Sync {

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn layout(&self) -> &ParameterLayout;

    fn aif(&self) -> &AifOperators;

    /// The bare kinetic equation. `params` is known to match the layout.
    fn signal(&self, params: &[f64]) -> Array1<f64>;

    /// Predicted curve on the PET grid. Never contains NaN or infinities:
    /// such curves are replaced by zeros.
    ///
    /// # Panics
    /// Panics if `params` does not match the layout.
    fn evaluate(&self, params: &[f64]) -> Array1<f64> {
        self.layout().check(params);
        finite_or_zeros(self.signal(params), params)
    }

    /// Keys accepted by `metrics`
    fn outputs(&self) -> Vec<&'static str>;

    /// Derived quantity `key`, computed from `params`.
    fn metrics(&self, params: &[f64], key: &str) -> Result<Array1<f64>>;

    /// The empty key selects the predicted curve, anything else a metric.
    fn evaluate_model(&self, params: &[f64], key: &str) -> Result<Array1<f64>> {
        if key.is_empty() { Ok(self.evaluate(params)) }
        else              { self.metrics(params, key) }
    }
}

pub(crate) fn unknown_output(model: &'static str, key: &str) -> Error {
    Error::UnknownOutput { model, key: key.to_string() }
}

/// Starting values for the model parameters, in model space. Each model
/// picks, and validates, the ones it needs.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Seeds {
    #[serde(rename = "vB"     )] pub vb     : f64,
    #[serde(rename = "K1"     )] pub k1     : f64,
    #[serde(rename = "k2"     )] pub k2     : f64,
    #[serde(rename = "alpha-1")] pub alpha_1: f64,
    #[serde(rename = "alpha-2")] pub alpha_2: f64,
    #[serde(rename = "beta-1" )] pub beta_1 : f64,
    #[serde(rename = "beta-2" )] pub beta_2 : f64,
    #[serde(rename = "Ki"     )] pub ki     : f64,
    #[serde(rename = "k-sum"  )] pub k_sum  : f64,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            vb     : 0.03,
            k1     : 0.05,
            k2     : 0.05,
            alpha_1: 0.001,
            alpha_2: 0.001,
            beta_1 : 0.0001,
            beta_2 : 0.001,
            ki     : 0.05,
            k_sum  : 0.05,
        }
    }
}

/// Everything, apart from the AIF, that a model needs at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelOptions {
    pub seeds: Seeds,
    pub physiology: Physiology,
}

pub type Constructor = fn(&ModelOptions, AifOperators) -> Box<dyn KineticModel>;

struct Entry {
    description: &'static str,
    constructor: Constructor,
}

/// Name-keyed model factory.
pub struct ModelRegistry {
    entries: BTreeMap<&'static str, Entry>,
}

impl ModelRegistry {

    pub fn empty() -> Self { Self { entries: BTreeMap::new() } }

    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(one_tissue   ::NAME, one_tissue   ::DESCRIPTION, OneTissue            ::boxed);
        registry.register(two_tissue   ::NAME, two_tissue   ::DESCRIPTION, TwoTissue            ::boxed);
        registry.register(two_tissue_ir::NAME, two_tissue_ir::DESCRIPTION, TwoTissueIrreversible::boxed);
        registry
    }

    /// Returns `true` if `name` was already registered, in which case its
    /// previous constructor has been replaced.
    pub fn register(&mut self, name: &'static str, description: &'static str, constructor: Constructor) -> bool {
        self.entries.insert(name, Entry { description, constructor }).is_some()
    }

    pub fn create(&self, name: &str, options: &ModelOptions, aif: AifOperators) -> Result<Box<dyn KineticModel>> {
        let entry = self.entries.get(name).ok_or_else(|| Error::UnknownModel(name.to_string()))?;
        let model = (entry.constructor)(options, aif);
        model.layout().check_seeds()?;
        info!(model = name, parameters = ?model.layout().names(), "model initialized");
        Ok(model)
    }

    /// Registered names, in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// `(name, description)` pairs, in alphabetical order
    pub fn describe(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().map(|(&name, entry)| (name, entry.description))
    }
}

impl Default for ModelRegistry {
    fn default() -> Self { Self::with_builtin() }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::operators::Extrapolation;

    pub const AIF: [f64; 10] = [0.0, 10.0, 8.0, 6.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0];

    pub fn t_0_to_9() -> Vec<f64> { (0..10).map(f64::from).collect() }

    /// AIF sampled on the PET grid `0, 1, ..., 9`
    pub fn aif_on_pet_grid() -> AifOperators {
        AifOperators::new(&AIF, None, &t_0_to_9(), Extrapolation::Linear).unwrap()
    }

    /// Running rectangle-rule integral of `AIF` with unit step
    pub fn cumulative_aif() -> Vec<f64> {
        AIF.iter().scan(0.0, |acc, a| { *acc += a; Some(*acc) }).collect()
    }
}
