//! Typed runtime settings and the YAML configuration document.

use crate::domain::error::PipelineError;
use crate::domain::ohlcv::check_asset_id;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

pub const DEFAULT_ENV: &str = "dev";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub env: String,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Settings {
    /// Builds settings from variable layers, highest priority first. Keys are
    /// matched case-insensitively; empty values fall back to the defaults.
    pub fn from_layers(layers: &[&HashMap<String, String>]) -> Self {
        let lookup = |name: &str| {
            layers.iter().find_map(|vars| {
                vars.iter()
                    .find(|(k, v)| k.eq_ignore_ascii_case(name) && !v.is_empty())
                    .map(|(_, v)| v.clone())
            })
        };

        let defaults = Settings::default();
        Self {
            env: lookup("ENV").unwrap_or(defaults.env),
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
        }
    }
}

/// Parsed YAML configuration. Only `market.universe` is read by the core; all
/// other keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub market: Option<MarketConfig>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub universe: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ConfigDocument {
    /// The configured asset ids, in order. Every id must be usable as a file
    /// name.
    pub fn universe(&self) -> Result<&[String], PipelineError> {
        let universe = self
            .market
            .as_ref()
            .and_then(|m| m.universe.as_deref())
            .ok_or_else(|| PipelineError::ConfigMissing {
                section: "market".into(),
                key: "universe".into(),
            })?;

        for id in universe {
            check_asset_id(id).map_err(|reason| PipelineError::ConfigInvalid {
                section: "market".into(),
                key: "universe".into(),
                reason,
            })?;
        }
        Ok(universe)
    }

    pub fn section(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.extra.get(name)
    }
}
