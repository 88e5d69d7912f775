//! Exponential Moving Average of close.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{
    sma_seeded_ema, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::Bar;

pub fn calculate_ema(bars: &[Bar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema = sma_seeded_ema(&closes, period);

    let values = bars
        .iter()
        .zip(ema)
        .map(|(bar, value)| match value {
            Some(v) => IndicatorPoint {
                ts: bar.ts,
                valid: true,
                value: IndicatorValue::Simple(v),
            },
            None => IndicatorPoint::unavailable(bar.ts, IndicatorValue::Simple(0.0)),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}
