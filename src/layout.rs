//! The ordered parameters of a kinetic model, with their priors and the
//! transforms relating model space to the space in which an optimizer
//! moves.
//!
//! A `ParameterLayout` is computed once, when a model is initialized, and
//! never changes afterwards: parameter vectors handed to `evaluate` are
//! interpreted by position according to it.

use ndarray::Array1;

use crate::{Error, Result};

/// Variance given to every prior and initial posterior: the seeds are
/// starting points, not information.
pub const SEED_VARIANCE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorFamily {
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistParams {
    pub mean: f64,
    pub variance: f64,
}

impl DistParams {
    pub fn new(mean: f64, variance: f64) -> Self { Self { mean, variance } }
}

/// Map between a parameter's physical (model) value and the unconstrained
/// value seen by an optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// Positive quantities: `model = exp(optimizer)`
    Log,
    /// Quantities in `(0, 1)`: `model = logistic(optimizer)`
    Fractional,
}

impl Transform {

    pub fn to_model(self, x: f64) -> f64 {
        use Transform::*;
        match self {
            Identity   => x,
            Log        => x.exp(),
            Fractional => 1.0 / (1.0 + (-x).exp()),
        }
    }

    pub fn to_optimizer(self, x: f64) -> f64 {
        use Transform::*;
        match self {
            Identity   => x,
            Log        => x.ln(),
            Fractional => (x / (1.0 - x)).ln(),
        }
    }

    /// Whether `to_optimizer` gives a finite value for model-space `x`, and if
    /// not, why.
    pub fn domain(self, x: f64) -> std::result::Result<(), &'static str> {
        use Transform::*;
        let ok = match self {
            Identity   => x.is_finite(),
            Log        => x.is_finite() && x > 0.0,
            Fractional => x > 0.0 && x < 1.0,
        };
        if ok { return Ok(()) }
        Err(match self {
            Identity   => "must be finite",
            Log        => "must be positive and finite",
            Fractional => "must lie strictly between 0 and 1",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name     : &'static str,
    pub family   : PriorFamily,
    /// In model space
    pub prior    : DistParams,
    /// In model space
    pub posterior: DistParams,
    pub transform: Transform,
}

impl ParameterSpec {

    /// Normal prior and initial posterior, both centred on `seed` with
    /// `SEED_VARIANCE`.
    pub fn seeded(name: &'static str, seed: f64, transform: Transform) -> Self {
        let dist = DistParams::new(seed, SEED_VARIANCE);
        Self { name, family: PriorFamily::Normal, prior: dist, posterior: dist, transform }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterLayout {
    specs: Vec<ParameterSpec>,
}

#[allow(clippy::len_without_is_empty)]
impl ParameterLayout {

    pub fn new(specs: Vec<ParameterSpec>) -> Self { Self { specs } }

    pub fn len(&self) -> usize { self.specs.len() }

    pub fn names(&self) -> Vec<&'static str> { self.specs.iter().map(|s| s.name).collect() }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterSpec> { self.specs.iter() }

    /// # Panics
    /// Panics if `params` does not have one value per parameter.
    pub fn check(&self, params: &[f64]) {
        assert_eq!(params.len(), self.len(),
                   "parameter vector has {} values, but the layout {:?} needs {}",
                   params.len(), self.names(), self.len());
    }

    pub fn to_model(&self, optimizer: &[f64]) -> Array1<f64> {
        self.check(optimizer);
        self.specs.iter().zip(optimizer)
            .map(|(spec, &x)| spec.transform.to_model(x))
            .collect()
    }

    pub fn to_optimizer(&self, model: &[f64]) -> Array1<f64> {
        self.check(model);
        self.specs.iter().zip(model)
            .map(|(spec, &x)| spec.transform.to_optimizer(x))
            .collect()
    }

    /// Model-space starting point for an optimizer.
    pub fn initial_means(&self) -> Array1<f64> {
        self.specs.iter().map(|s| s.posterior.mean).collect()
    }

    /// Every seed must map to a finite optimizer value.
    pub fn check_seeds(&self) -> Result<()> {
        for spec in &self.specs {
            let seed = spec.posterior.mean;
            if let Err(reason) = spec.transform.domain(seed) {
                return Err(Error::InvalidOption { option: spec.name, value: seed.to_string(), reason })
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParameterLayout {
    type Item = &'a ParameterSpec;
    type IntoIter = std::slice::Iter<'a, ParameterSpec>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
