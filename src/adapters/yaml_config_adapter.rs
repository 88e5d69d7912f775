//! Layered configuration adapter: process environment, `.env` file, YAML file.
//!
//! The YAML document is parsed, dumped back to text, placeholder-expanded and
//! parsed again, so `${NAME:default}` may appear anywhere, keys included.

use crate::domain::error::PipelineError;
use crate::domain::interpolate::expand_placeholders;
use crate::domain::settings::{ConfigDocument, Settings};
use crate::ports::config_port::ConfigSource;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";
pub const DEFAULT_ENV_FILE: &str = ".env";

pub struct YamlConfigAdapter {
    config_path: PathBuf,
    env_file: PathBuf,
    process_env: Option<HashMap<String, String>>,
}

impl Default for YamlConfigAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH, DEFAULT_ENV_FILE)
    }
}

impl YamlConfigAdapter {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(config_path: P, env_file: Q) -> Self {
        Self {
            config_path: config_path.into(),
            env_file: env_file.into(),
            process_env: None,
        }
    }

    /// Replaces the process environment layer, mainly for tests.
    pub fn with_process_env(mut self, vars: HashMap<String, String>) -> Self {
        self.process_env = Some(vars);
        self
    }

    fn process_layer(&self) -> HashMap<String, String> {
        match &self.process_env {
            Some(vars) => vars.clone(),
            None => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }
}

impl ConfigSource for YamlConfigAdapter {
    fn resolve(&self) -> Result<(Settings, ConfigDocument), PipelineError> {
        let process = self.process_layer();
        let dotenv = load_env_file(&self.env_file)?;
        let settings = Settings::from_layers(&[&process, &dotenv]);

        let lookup = |name: &str| process.get(name).or_else(|| dotenv.get(name)).cloned();
        let document = load_document(&self.config_path, lookup)?;

        fs::create_dir_all(&settings.data_dir).map_err(|e| PipelineError::ConfigInvalid {
            section: "settings".into(),
            key: "data_dir".into(),
            reason: format!("cannot create {}: {}", settings.data_dir.display(), e),
        })?;
        log::debug!(
            "resolved config from {} (env={}, data_dir={})",
            self.config_path.display(),
            settings.env,
            settings.data_dir.display()
        );

        Ok((settings, document))
    }
}

/// Reads a dotenv-style file without touching the process environment.
/// A missing file yields an empty layer.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, PipelineError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let parse_err = |e: dotenv::Error| PipelineError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    };

    let mut vars = HashMap::new();
    for item in dotenv::from_path_iter(path).map_err(parse_err)? {
        let (key, value) = item.map_err(parse_err)?;
        vars.insert(key, value);
    }
    Ok(vars)
}

pub fn load_document<F>(path: &Path, lookup: F) -> Result<ConfigDocument, PipelineError>
where
    F: Fn(&str) -> Option<String>,
{
    let content = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
        file: path.display().to_string(),
        source,
    })?;
    parse_document(&content, &path.display().to_string(), lookup)
}

pub fn parse_document<F>(content: &str, file: &str, lookup: F) -> Result<ConfigDocument, PipelineError>
where
    F: Fn(&str) -> Option<String>,
{
    let parse_err = |reason: String| PipelineError::ConfigParse {
        file: file.to_string(),
        reason,
    };

    let raw = or_empty(serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?);
    let dumped = serde_yaml::to_string(&raw).map_err(|e| parse_err(e.to_string()))?;
    let expanded = expand_placeholders(&dumped, lookup);
    let value = or_empty(
        serde_yaml::from_str(&expanded)
            .map_err(|e| parse_err(format!("after placeholder expansion: {}", e)))?,
    );

    serde_yaml::from_value(value).map_err(|e| parse_err(e.to_string()))
}

fn or_empty(value: Value) -> Value {
    match value {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other,
    }
}
