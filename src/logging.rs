//! Process-wide logging from a declarative YAML document.
//!
//! ```yaml
//! level: info
//! timestamps: true
//! modules:
//!   featurepipe::adapters: debug
//! ```
//!
//! `RUST_LOG`, when set, is applied on top of the file.

use crate::domain::error::PipelineError;
use log::LevelFilter;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_LOGGING_PATH: &str = "config/logging.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub timestamps: bool,
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timestamps: true,
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, PipelineError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse_str(&content, &path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(PipelineError::ConfigRead {
                file: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn parse_str(content: &str, file: &str) -> Result<Self, PipelineError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PipelineError::ConfigParse {
            file: file.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn level_filter(&self) -> Result<LevelFilter, PipelineError> {
        parse_level("level", &self.level)
    }

    pub fn module_filters(&self) -> Result<Vec<(&str, LevelFilter)>, PipelineError> {
        self.modules
            .iter()
            .map(|(module, level)| Ok((module.as_str(), parse_level(module, level)?)))
            .collect()
    }
}

fn parse_level(key: &str, value: &str) -> Result<LevelFilter, PipelineError> {
    value.parse().map_err(|_| PipelineError::ConfigInvalid {
        section: "logging".into(),
        key: key.to_string(),
        reason: format!("unknown level {value:?}"),
    })
}

/// Installs the global logger. Calling it again is a no-op.
pub fn setup_logging(path: &Path) -> Result<(), PipelineError> {
    let config = LoggingConfig::from_file(path)?;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.level_filter()?);
    for (module, level) in config.module_filters()? {
        builder.filter_module(module, level);
    }
    if !config.timestamps {
        builder.format_timestamp(None);
    }
    builder.parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
    Ok(())
}
