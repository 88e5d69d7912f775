//! OHLCV bar representation.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    #[default]
    Daily,
    Hourly,
    Weekly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "1d",
            Timeframe::Hourly => "1h",
            Timeframe::Weekly => "W",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1d" => Ok(Timeframe::Daily),
            "1h" => Ok(Timeframe::Hourly),
            "W" => Ok(Timeframe::Weekly),
            other => Err(format!("unknown timeframe {other:?} (expected 1d, 1h or W)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub ticker: String,
    pub ts: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BarError {
    #[error("{field} is not a finite number ({value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("low {low} above open/close (open {open}, close {close})")]
    LowAboveBody { low: f64, open: f64, close: f64 },

    #[error("high {high} below open/close (open {open}, close {close})")]
    HighBelowBody { high: f64, open: f64, close: f64 },

    #[error("negative volume {0}")]
    NegativeVolume(f64),
}

impl Bar {
    /// Every price and the volume are finite.
    pub fn check_finite(&self) -> Result<(), BarError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(BarError::NonFinite { field, value }),
            None => Ok(()),
        }
    }

    /// Finite fields, low <= open,close <= high and volume >= 0.
    pub fn check_invariants(&self) -> Result<(), BarError> {
        self.check_finite()?;
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        if self.low > body_low {
            return Err(BarError::LowAboveBody {
                low: self.low,
                open: self.open,
                close: self.close,
            });
        }
        if self.high < body_high {
            return Err(BarError::HighBelowBody {
                high: self.high,
                open: self.open,
                close: self.close,
            });
        }
        if self.volume < 0.0 {
            return Err(BarError::NegativeVolume(self.volume));
        }
        Ok(())
    }
}

/// Asset ids become file names, so they must be a single path component.
pub fn check_asset_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("empty asset id".to_string());
    }
    if id == "." || id == ".." || id.contains(['/', '\\', '\0']) {
        return Err(format!("asset id {id:?} is not a plain file name"));
    }
    Ok(())
}
