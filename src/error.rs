//! Error types for petkin

use std::path::PathBuf;
use thiserror::Error;

/// Configuration and initialization failures.
///
/// Everything in here is fatal: a model is never built from input which
/// produced one of these. Problems arising while *evaluating* a model are
/// not errors (see `guard`).
#[derive(Error, Debug)]
pub enum Error {
    #[error("{series} series is empty")]
    EmptySeries { series: &'static str },

    #[error("{series} series has {len} sample(s): at least two are needed to define a time step")]
    TooShort { series: &'static str, len: usize },

    #[error("{series}: {values} values but {times} timestamps")]
    LengthMismatch { series: &'static str, values: usize, times: usize },

    #[error("non-finite value {value} at index {index} of {series} series")]
    NonFinite { series: &'static str, index: usize, value: f64 },

    #[error("{series} timestamps must be strictly increasing: t[{index}] = {previous}, t[{}] = {next}", .index + 1)]
    NonIncreasing { series: &'static str, index: usize, previous: f64, next: f64 },

    #[error("time step {step} derived from {series} timestamps is not positive")]
    NonPositiveStep { series: &'static str, step: f64 },

    #[error("interpolation target {target} lies outside source range [{low}, {high}]")]
    OutOfRange { target: f64, low: f64, high: f64 },

    #[error("unknown model `{0}`")]
    UnknownModel(String),

    #[error("model `{model}` has no output `{key}`")]
    UnknownOutput { model: &'static str, key: String },

    #[error("invalid value `{value}` for option `{option}`: {reason}")]
    InvalidOption { option: &'static str, value: String, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("cannot parse `{token}` as a number on line {line} of {}", .path.display())]
    Parse { path: PathBuf, line: usize, token: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
