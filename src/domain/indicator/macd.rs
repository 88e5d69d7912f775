//! MACD (Moving Average Convergence Divergence) of close.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line, seeded with the SMA of its first
//! `signal` defined values
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: max(fast, slow) - 1 + signal - 1 bars. Line, signal and histogram
//! become valid together.

use crate::domain::indicator::{
    sma_seeded_ema, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::Bar;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[Bar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };
    let placeholder = IndicatorValue::Macd {
        line: 0.0,
        signal: 0.0,
        histogram: 0.0,
    };
    let mut values: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| IndicatorPoint::unavailable(b.ts, placeholder.clone()))
        .collect();

    if fast == 0 || slow == 0 || signal_period == 0 {
        return IndicatorSeries {
            indicator_type,
            values,
        };
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let ema_fast = sma_seeded_ema(&closes, fast);
    let ema_slow = sma_seeded_ema(&closes, slow);

    let line_start = fast.max(slow) - 1;
    if bars.len() <= line_start {
        return IndicatorSeries {
            indicator_type,
            values,
        };
    }

    let mut macd_line: Vec<f64> = Vec::with_capacity(bars.len() - line_start);
    for (f, s) in ema_fast.iter().zip(&ema_slow).skip(line_start) {
        if let (Some(f), Some(s)) = (f, s) {
            macd_line.push(f - s);
        }
    }

    let signal_line = sma_seeded_ema(&macd_line, signal_period);
    for (offset, (line, signal)) in macd_line.iter().zip(signal_line).enumerate() {
        if let Some(signal) = signal {
            values[line_start + offset] = IndicatorPoint {
                ts: bars[line_start + offset].ts,
                valid: true,
                value: IndicatorValue::Macd {
                    line: *line,
                    signal,
                    histogram: line - signal,
                },
            };
        }
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}
