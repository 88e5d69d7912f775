//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values, one point per input bar
//!
//! Points inside an indicator's warm-up window carry `valid == false`; their
//! `value` is a placeholder and must not be read.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;

use chrono::{DateTime, Utc};

/// Identifies the numeric conventions used by every indicator in this module
/// (SMA-seeded EMA, Wilder-smoothed RSI, jointly-gated MACD triple).
pub const INDICATOR_CONVENTION: &str = "sma-seed/v1";

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub ts: DateTime<Utc>,
    pub valid: bool,
    pub value: IndicatorValue,
}

impl IndicatorPoint {
    pub fn unavailable(ts: DateTime<Utc>, value: IndicatorValue) -> Self {
        Self {
            ts,
            valid: false,
            value,
        }
    }

    /// The scalar value, or `None` inside the warm-up window.
    pub fn simple(&self) -> Option<f64> {
        match (self.valid, &self.value) {
            (true, IndicatorValue::Simple(v)) => Some(*v),
            _ => None,
        }
    }

    /// `(line, signal, histogram)`, or `None` inside the warm-up window.
    pub fn macd(&self) -> Option<(f64, f64, f64)> {
        match (self.valid, &self.value) {
            (
                true,
                IndicatorValue::Macd {
                    line,
                    signal,
                    histogram,
                },
            ) => Some((*line, *signal, *histogram)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(IndicatorPoint::simple).collect()
    }
}

/// Exponential smoothing over raw values, seeded with the simple mean of the
/// first `period` values. Entries before the seed are `None`.
pub(crate) fn sma_seeded_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(ema);

    for (i, value) in values.iter().enumerate().skip(period) {
        ema = value * k + ema * (1.0 - k);
        out[i] = Some(ema);
    }
    out
}
