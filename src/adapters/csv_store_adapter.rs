//! CSV file store adapter.
//!
//! Layout under the base path: `<category segments>/<asset>.csv`, e.g.
//! `raw/prices/AAPL.csv` and `features/tech/AAPL.csv`.

use crate::domain::error::PipelineError;
use crate::domain::features::{FeatureRow, FEATURE_COLUMNS};
use crate::domain::ohlcv::{check_asset_id, Bar, Timeframe};
use crate::domain::timestamp::{format_timestamp, parse_timestamp};
use crate::ports::store_port::{Category, SeriesStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub struct CsvStore {
    base_path: PathBuf,
}

impl CsvStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawBarRecord {
    ts: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    #[serde(default)]
    timeframe: Option<String>,
}

#[derive(Debug, Serialize)]
struct FeatureRecord<'a> {
    ts: String,
    ticker: &'a str,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    timeframe: &'static str,
    ema_20: Option<f64>,
    ema_50: Option<f64>,
    rsi_14: Option<f64>,
    macd: Option<f64>,
    macd_signal: Option<f64>,
    macd_hist: Option<f64>,
}

impl<'a> From<&'a FeatureRow> for FeatureRecord<'a> {
    fn from(row: &'a FeatureRow) -> Self {
        Self {
            ts: format_timestamp(&row.bar.ts),
            ticker: &row.bar.ticker,
            open: row.bar.open,
            high: row.bar.high,
            low: row.bar.low,
            close: row.bar.close,
            volume: row.bar.volume,
            timeframe: row.bar.timeframe.as_str(),
            ema_20: row.ema_20,
            ema_50: row.ema_50,
            rsi_14: row.rsi_14,
            macd: row.macd,
            macd_signal: row.macd_signal,
            macd_hist: row.macd_hist,
        }
    }
}

impl SeriesStore for CsvStore {
    fn location(&self, category: Category, asset: &str) -> PathBuf {
        let mut path = self.base_path.clone();
        path.extend(category.segments());
        path.push(format!("{}.csv", asset));
        path
    }

    fn read_raw_series(&self, asset: &str) -> Result<Option<Vec<Bar>>, PipelineError> {
        check_asset_id(asset).map_err(|reason| PipelineError::Store { reason })?;
        let path = self.location(Category::RawPrices, asset);
        if !path.is_file() {
            return Ok(None);
        }

        let malformed = |reason: String| PipelineError::MalformedSeries {
            asset: asset.to_string(),
            reason,
        };

        let mut rdr = csv::Reader::from_path(&path)
            .map_err(|e| malformed(format!("failed to open {}: {}", path.display(), e)))?;

        let mut bars = Vec::new();
        for (line, result) in rdr.deserialize::<RawBarRecord>().enumerate() {
            let record = result.map_err(|e| malformed(format!("CSV parse error: {}", e)))?;

            let ts = parse_timestamp(&record.ts)
                .map_err(|e| malformed(format!("row {}: {}", line + 1, e)))?;
            let timeframe = match record.timeframe.as_deref() {
                None | Some("") => Timeframe::default(),
                Some(raw) => raw
                    .parse()
                    .map_err(|e| malformed(format!("row {}: {}", line + 1, e)))?,
            };

            let bar = Bar {
                ticker: asset.to_string(),
                ts,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume,
                timeframe,
            };
            bar.check_finite()
                .map_err(|e| malformed(format!("row {}: {}", line + 1, e)))?;
            bars.push(bar);
        }

        Ok(Some(bars))
    }

    fn write_feature_frame(
        &self,
        asset: &str,
        category: Category,
        rows: &[FeatureRow],
    ) -> Result<PathBuf, PipelineError> {
        check_asset_id(asset).map_err(|reason| PipelineError::Store { reason })?;
        let path = self.location(category, asset);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::Store {
                reason: format!("cannot create {}: {}", parent.display(), e),
            })?;
        }

        let store_err = |e: csv::Error| PipelineError::Store {
            reason: format!("failed to write {}: {}", path.display(), e),
        };

        let mut wtr = csv::Writer::from_path(&path).map_err(store_err)?;
        if rows.is_empty() {
            wtr.write_record(feature_header()).map_err(store_err)?;
        }
        for row in rows {
            wtr.serialize(FeatureRecord::from(row)).map_err(store_err)?;
        }
        wtr.flush().map_err(|e| PipelineError::Store {
            reason: format!("failed to flush {}: {}", path.display(), e),
        })?;

        Ok(path)
    }
}

const BAR_COLUMNS: [&str; 8] = [
    "ts",
    "ticker",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "timeframe",
];

/// Bar columns followed by the derived feature columns. `FeatureRecord` field
/// order must match.
fn feature_header() -> Vec<&'static str> {
    BAR_COLUMNS.iter().chain(FEATURE_COLUMNS.iter()).copied().collect()
}
