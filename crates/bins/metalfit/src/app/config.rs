use crate::{app::args::SearchOptions, error::RuntimeError};
use base::{EvalParams, MetalPreset, BUILTIN_PRESETS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "metalfit.toml";

/// Options configured by user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search and display parameters.
    pub fit: EvalParams,
    /// Metals appended after the built-in presets.
    pub presets: Vec<MetalPreset>,
}

impl Config {
    /// Parses a configuration from its toml text.
    pub fn parse(text: &str) -> Result<Self, RuntimeError> {
        let config: Config = toml::from_str(text)?;
        Ok(config)
    }

    /// Loads the configuration.
    ///
    /// An explicitly given file must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// in the working directory is loaded when present, otherwise the
    /// defaults are used.
    pub fn load(filepath: Option<&Path>) -> Result<Self, RuntimeError> {
        let path = match filepath {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    log::debug!("No {} found, using the default configuration", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                path
            },
        };
        log::info!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|err| RuntimeError::Config {
            path: path.clone(),
            source: Box::new(err.into()),
        })?;
        let config = Self::parse(&text).map_err(|err| RuntimeError::Config {
            path: path.clone(),
            source: Box::new(err),
        })?;
        log::info!("  - IOR range: {}", config.fit.fit.ior_range);
        log::info!("  - Angle samples: {}", config.fit.fit.angle_samples);
        log::info!("  - Display samples: {}", config.fit.display_samples);
        log::info!("  - Extra presets: {}", config.presets.len());
        Ok(config)
    }

    /// Evaluation parameters with the command line overrides applied.
    pub fn eval_params(&self, search: &SearchOptions) -> EvalParams {
        let mut params = self.fit;
        if let Some(range) = search.ior_range {
            params.fit.ior_range = range;
        }
        if let Some(samples) = search.angle_samples {
            params.fit.angle_samples = samples;
        }
        if let Some(samples) = search.display_samples {
            params.display_samples = samples;
        }
        params
    }

    /// Built-in presets followed by the configured ones.
    pub fn presets(&self) -> impl Iterator<Item = &MetalPreset> {
        BUILTIN_PRESETS.iter().chain(self.presets.iter())
    }

    /// Looks up a preset by name, ignoring case. Configured presets shadow the
    /// built-in ones.
    pub fn find_preset(&self, name: &str) -> Option<&MetalPreset> {
        self.presets
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
            .or_else(|| MetalPreset::find(name))
    }

    /// Resolves a list of names; all presets when the list is empty.
    pub fn select_presets(&self, names: &[String]) -> Result<Vec<MetalPreset>, RuntimeError> {
        if names.is_empty() {
            return Ok(self.presets().cloned().collect());
        }
        names
            .iter()
            .map(|name| {
                self.find_preset(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UnknownPreset(name.clone()))
            })
            .collect()
    }
}
