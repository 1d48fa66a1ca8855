//! Forward models for PET tracer kinetics.
//!
//! A model is built once from a measured arterial input function (AIF) and
//! the PET frame times; it then predicts the tissue time-activity curve for
//! any vector of kinetic parameters, cheaply enough to sit inside the inner
//! loop of an optimizer.

pub mod error;
pub mod series;
pub mod operators;
pub mod aif;
pub mod layout;
pub mod rates;
pub mod guard;
pub mod models;
pub mod config;
pub mod io;
pub mod utils;

pub use error::{Error, Result};
pub use aif::AifOperators;
pub use layout::{ParameterLayout, Transform};
pub use models::{KineticModel, ModelOptions, ModelRegistry};
pub use operators::Extrapolation;
pub use rates::Physiology;

/// Version of the model library, as reported to hosts
pub fn version() -> &'static str { env!("CARGO_PKG_VERSION") }
