//! Technical feature rows: one input bar plus its derived indicator columns.

use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{calculate_ema, calculate_macd, calculate_rsi};
use crate::domain::ohlcv::Bar;

pub const EMA_SHORT: usize = 20;
pub const EMA_LONG: usize = 50;
pub const RSI_PERIOD: usize = 14;

/// Derived column names, in the order they are appended.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "ema_20",
    "ema_50",
    "rsi_14",
    "macd",
    "macd_signal",
    "macd_hist",
];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub bar: Bar,
    pub ema_20: Option<f64>,
    pub ema_50: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
}

/// Sorts `series` by timestamp and derives every feature column.
///
/// The sort is stable: bars sharing a timestamp keep their input order and are
/// not deduplicated. The output has exactly one row per input bar.
pub fn compute_indicators(mut series: Vec<Bar>) -> Vec<FeatureRow> {
    series.sort_by_key(|b| b.ts);

    let ema_20 = calculate_ema(&series, EMA_SHORT).simple_values();
    let ema_50 = calculate_ema(&series, EMA_LONG).simple_values();
    let rsi_14 = calculate_rsi(&series, RSI_PERIOD).simple_values();
    let macd = calculate_macd(&series, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL);

    series
        .into_iter()
        .enumerate()
        .map(|(i, bar)| {
            let triple = macd.values[i].macd();
            FeatureRow {
                bar,
                ema_20: ema_20[i],
                ema_50: ema_50[i],
                rsi_14: rsi_14[i],
                macd: triple.map(|(line, _, _)| line),
                macd_signal: triple.map(|(_, signal, _)| signal),
                macd_hist: triple.map(|(_, _, hist)| hist),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::Timeframe;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn bar_at(day: i64, close: f64) -> Bar {
        Bar {
            ticker: "TEST".into(),
            ts: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10.0,
            timeframe: Timeframe::Daily,
        }
    }

    fn rising(count: usize) -> Vec<Bar> {
        (0..count).map(|i| bar_at(i as i64, 100.0 + i as f64)).collect()
    }

    #[test]
    fn empty_series_yields_no_rows() {
        assert!(compute_indicators(Vec::new()).is_empty());
    }

    #[test]
    fn short_series_has_no_ema_20() {
        let rows = compute_indicators(rising(19));
        assert_eq!(rows.len(), 19);
        assert!(rows.iter().all(|r| r.ema_20.is_none()));
    }

    #[test]
    fn ema_20_first_available_at_row_20() {
        let rows = compute_indicators(rising(20));
        assert!(rows[..19].iter().all(|r| r.ema_20.is_none()));
        let expected = (0..20).map(|i| 100.0 + i as f64).sum::<f64>() / 20.0;
        approx::assert_abs_diff_eq!(rows[19].ema_20.unwrap(), expected, epsilon = 1e-12);
        assert!(rows[19].ema_50.is_none());
    }

    #[test]
    fn rising_closes_pin_rsi_at_100() {
        let rows = compute_indicators(rising(30));
        assert!(rows[..14].iter().all(|r| r.rsi_14.is_none()));
        for row in &rows[14..] {
            assert_eq!(row.rsi_14, Some(100.0));
        }
    }

    #[test]
    fn macd_columns_share_availability() {
        let rows = compute_indicators(rising(40));
        for (i, row) in rows.iter().enumerate() {
            let available = i >= 33;
            assert_eq!(row.macd.is_some(), available, "row {}", i);
            assert_eq!(row.macd_signal.is_some(), available, "row {}", i);
            assert_eq!(row.macd_hist.is_some(), available, "row {}", i);
        }
    }

    #[test]
    fn unsorted_input_is_sorted_before_computation() {
        let mut shuffled = rising(25);
        shuffled.reverse();
        let rows = compute_indicators(shuffled);

        assert!(rows.windows(2).all(|w| w[0].bar.ts <= w[1].bar.ts));
        assert_eq!(rows, compute_indicators(rising(25)));
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let mut a = bar_at(0, 10.0);
        a.ticker = "FIRST".into();
        let mut b = bar_at(0, 11.0);
        b.ticker = "SECOND".into();
        let rows = compute_indicators(vec![bar_at(1, 12.0), a, b]);

        let order: Vec<&str> = rows.iter().map(|r| r.bar.ticker.as_str()).collect();
        assert_eq!(order, vec!["FIRST", "SECOND", "TEST"]);
    }

    proptest! {
        #[test]
        fn row_count_matches_input(closes in prop::collection::vec(1.0f64..1000.0, 0..120)) {
            let bars: Vec<Bar> = closes
                .iter()
                .enumerate()
                .map(|(i, &c)| bar_at(i as i64, c))
                .collect();
            let rows = compute_indicators(bars);
            prop_assert_eq!(rows.len(), closes.len());
        }

        #[test]
        fn histogram_is_line_minus_signal(closes in prop::collection::vec(1.0f64..1000.0, 34..120)) {
            let bars: Vec<Bar> = closes
                .iter()
                .enumerate()
                .map(|(i, &c)| bar_at(i as i64, c))
                .collect();
            for row in compute_indicators(bars) {
                if let (Some(line), Some(signal), Some(hist)) = (row.macd, row.macd_signal, row.macd_hist) {
                    prop_assert!((hist - (line - signal)).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn rsi_stays_in_bounds(closes in prop::collection::vec(1.0f64..1000.0, 15..80)) {
            let bars: Vec<Bar> = closes
                .iter()
                .enumerate()
                .map(|(i, &c)| bar_at(i as i64, c))
                .collect();
            for rsi in compute_indicators(bars).iter().filter_map(|r| r.rsi_14) {
                prop_assert!((0.0..=100.0).contains(&rsi));
            }
        }
    }
}
