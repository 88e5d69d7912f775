#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use featurepipe::domain::error::PipelineError;
use featurepipe::domain::features::FeatureRow;
pub use featurepipe::domain::ohlcv::{Bar, Timeframe};
use featurepipe::ports::store_port::{Category, SeriesStore};
use log::{Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct ThreadCapture;

impl Log for ThreadCapture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static CAPTURE: ThreadCapture = ThreadCapture;
static INSTALL: Once = Once::new();

/// Runs `f` and returns the log records it emitted on the current thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|c| c.borrow_mut().drain(..).collect());
    (result, records)
}

pub fn warnings(records: &[(Level, String)]) -> Vec<&str> {
    records
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message.as_str())
        .collect()
}

pub struct MockStore {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
    pub written: RefCell<Vec<(String, Category, Vec<FeatureRow>)>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, asset: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(asset.to_string(), bars);
        self
    }

    pub fn with_write_error(mut self, asset: &str, reason: &str) -> Self {
        self.errors.insert(asset.to_string(), reason.to_string());
        self
    }

    pub fn written_assets(&self) -> Vec<String> {
        self.written
            .borrow()
            .iter()
            .map(|(asset, _, _)| asset.clone())
            .collect()
    }
}

impl SeriesStore for MockStore {
    fn location(&self, category: Category, asset: &str) -> PathBuf {
        let mut path = PathBuf::from("mock");
        path.extend(category.segments());
        path.join(format!("{}.csv", asset))
    }

    fn read_raw_series(&self, asset: &str) -> Result<Option<Vec<Bar>>, PipelineError> {
        Ok(self.data.get(asset).cloned())
    }

    fn write_feature_frame(
        &self,
        asset: &str,
        category: Category,
        rows: &[FeatureRow],
    ) -> Result<PathBuf, PipelineError> {
        if let Some(reason) = self.errors.get(asset) {
            return Err(PipelineError::Store {
                reason: reason.clone(),
            });
        }
        self.written
            .borrow_mut()
            .push((asset.to_string(), category, rows.to_vec()));
        Ok(self.location(category, asset))
    }
}

pub fn generate_bars(ticker: &str, count: usize, start_price: f64) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let close = start_price + (i as f64 * 0.9).sin() * 3.0 + i as f64 * 0.2;
            Bar {
                ticker: ticker.to_string(),
                ts: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000.0 + i as f64,
                timeframe: Timeframe::Daily,
            }
        })
        .collect()
}

/// Writes `bars` as a raw price CSV under `data_dir`.
pub fn write_raw_csv(data_dir: &Path, asset: &str, bars: &[Bar]) {
    let dir = data_dir.join("raw").join("prices");
    fs::create_dir_all(&dir).unwrap();
    let mut content = String::from("ts,open,high,low,close,volume,timeframe\n");
    for bar in bars {
        content.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            bar.ts.to_rfc3339(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            bar.timeframe
        ));
    }
    fs::write(dir.join(format!("{}.csv", asset)), content).unwrap();
}

pub fn universe(assets: &[&str]) -> Vec<String> {
    assets.iter().map(|a| a.to_string()).collect()
}
