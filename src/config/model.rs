//! Configuration file parser for kinetic models

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{
    Error, Result,
    aif::AifOperators,
    io::ascii::read_values,
    models::{KineticModel, ModelOptions, ModelRegistry, Seeds},
    operators::Extrapolation,
    rates::Physiology,
};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {

    /// Name under which the model is registered, e.g. `pet_1TCM`
    pub model: String,

    /// Kind of AIF data. Only `signal` is supported.
    #[serde(default = "default_aif")]
    pub aif: String,

    /// AIF values
    pub aif_data: PathBuf,

    /// AIF sample times. If missing, the AIF is taken to be sampled at the
    /// PET frame times.
    pub aif_time: Option<PathBuf>,

    /// PET frame times
    pub time_data: PathBuf,

    /// Treatment of PET frames outside the AIF's time range
    #[serde(default)]
    pub extrapolation: Extrapolation,

    /// Tissue density, g/mL
    #[serde(default = "default_density")]
    pub density: f64,

    /// Plasma glucose, mg/dL. 0 means not measured.
    #[serde(default)]
    pub ca: f64,

    /// Lumped constant
    #[serde(default = "default_lc")]
    pub lc: f64,

    #[serde(default)]
    pub init: Seeds,
}

fn default_aif    () -> String { "signal".into() }
fn default_density() -> f64    { 1.05 }
fn default_lc     () -> f64    { 0.81 }

/// Relative data paths in the file are taken relative to the directory
/// containing it.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&text)?;
    if let Some(dir) = path.parent() {
        config.resolve_paths(dir);
    }
    debug!(path = %path.display(), ?config, "read configuration");
    Ok(config)
}

impl Config {

    fn resolve_paths(&mut self, dir: &Path) {
        let resolve = |p: &mut PathBuf| if p.is_relative() { *p = dir.join(&*p) };
        resolve(&mut self.aif_data);
        resolve(&mut self.time_data);
        if let Some(p) = self.aif_time.as_mut() { resolve(p) }
    }

    /// Validated scalar options. Seeds are checked by the model, against its
    /// own parameters.
    pub fn options(&self) -> Result<ModelOptions> {
        if self.aif != "signal" {
            return Err(Error::InvalidOption {
                option: "aif",
                value: self.aif.clone(),
                reason: "only `signal` is supported",
            })
        }
        let physiology = Physiology::new(self.density, self.ca, self.lc)?;
        Ok(ModelOptions { seeds: self.init, physiology })
    }

    /// Load the AIF and PET series, and construct the configured model.
    pub fn build(&self, registry: &ModelRegistry) -> Result<Box<dyn KineticModel>> {
        let options = self.options()?;
        let aif      = read_values(&self.aif_data)?;
        let pet_time = read_values(&self.time_data)?;
        let aif_time = self.aif_time.as_deref().map(read_values).transpose()?;
        let aif = AifOperators::new(&aif, aif_time.as_deref(), &pet_time, self.extrapolation)?;
        registry.create(&self.model, &options, aif)
    }
}
