//! Sidecar descriptor for a persisted feature frame.
//!
//! Describes a frame without embedding it; nothing checks that the frame on
//! disk actually matches.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCHEMA_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrameMeta {
    pub ticker: String,
    pub freq: Frequency,
    pub source: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    DEFAULT_SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetaError {
    #[error("empty {0}")]
    Empty(&'static str),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

impl FeatureFrameMeta {
    pub fn new(ticker: impl Into<String>, freq: Frequency, source: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            freq,
            source: source.into(),
            version: default_version(),
        }
    }

    pub fn validate(&self) -> Result<(), MetaError> {
        if self.ticker.trim().is_empty() {
            return Err(MetaError::Empty("ticker"));
        }
        if self.source.trim().is_empty() {
            return Err(MetaError::Empty("source"));
        }
        if self.version.trim().is_empty() {
            return Err(MetaError::Empty("version"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_defaults_when_absent() {
        let meta: FeatureFrameMeta =
            serde_yaml::from_str("ticker: AAPL\nfreq: D\nsource: technical\n").unwrap();
        assert_eq!(meta.version, DEFAULT_SCHEMA_VERSION);
        assert_eq!(meta.freq, Frequency::Daily);
        assert_eq!(meta.validate(), Ok(()));
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        let parsed: Result<FeatureFrameMeta, _> =
            serde_yaml::from_str("ticker: AAPL\nfreq: Q\nsource: technical\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_ticker_fails_validation() {
        let meta = FeatureFrameMeta::new("  ", Frequency::Weekly, "technical");
        assert_eq!(meta.validate(), Err(MetaError::Empty("ticker")));
    }
}
