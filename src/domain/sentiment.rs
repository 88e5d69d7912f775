//! Scored text documents (news items, social posts) attached to a point in
//! time and optionally to one ticker.

use crate::domain::frame_meta::MetaError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    News,
    Social,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDoc {
    pub doc_id: String,
    pub ts: DateTime<Utc>,
    #[serde(default)]
    pub ticker: Option<String>,
    pub provider: Provider,
    pub score: f64,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_yaml::Value>,
}

impl SentimentDoc {
    pub fn validate(&self) -> Result<(), MetaError> {
        if self.doc_id.trim().is_empty() {
            return Err(MetaError::Empty("doc_id"));
        }
        if self.ticker.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(MetaError::Empty("ticker"));
        }
        if !self.score.is_finite() {
            return Err(MetaError::NonFinite("score"));
        }
        Ok(())
    }
}
