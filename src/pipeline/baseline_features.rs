//! Baseline technical features for every asset in the configured universe.

use crate::adapters::csv_store_adapter::CsvStore;
use crate::adapters::yaml_config_adapter::YamlConfigAdapter;
use crate::domain::error::PipelineError;
use crate::domain::features::compute_indicators;
use crate::domain::indicator::INDICATOR_CONVENTION;
use crate::ports::config_port::ConfigSource;
use crate::ports::store_port::{Category, SeriesStore};

pub const TARGET: &str = "modules.baseline_features:run";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    /// At least one asset had no raw series and was skipped.
    Partial,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub universe_size: usize,
    pub processed: Vec<String>,
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn status(&self) -> RunStatus {
        if self.skipped.is_empty() {
            RunStatus::Complete
        } else {
            RunStatus::Partial
        }
    }
}

/// Derives and persists technical features for each asset, in universe order.
///
/// Assets without a raw series are logged and skipped. Malformed raw data and
/// write failures abort the run.
pub fn build_features(
    universe: &[String],
    store: &dyn SeriesStore,
) -> Result<RunSummary, PipelineError> {
    let mut summary = RunSummary {
        universe_size: universe.len(),
        ..RunSummary::default()
    };

    for asset in universe {
        let bars = match store.read_raw_series(asset)? {
            Some(bars) => bars,
            None => {
                log::warn!(
                    "no raw price series for {} at {} (skipping)",
                    asset,
                    store.location(Category::RawPrices, asset).display()
                );
                summary.skipped.push(asset.clone());
                continue;
            }
        };

        let violations = bars.iter().filter(|b| b.check_invariants().is_err()).count();
        if violations > 0 {
            log::warn!(
                "{}: {} of {} bars violate OHLC invariants",
                asset,
                violations,
                bars.len()
            );
        }

        let rows = compute_indicators(bars);
        let path = store.write_feature_frame(asset, Category::TechnicalFeatures, &rows)?;
        log::debug!("wrote {} rows for {} to {}", rows.len(), asset, path.display());
        summary.processed.push(asset.clone());
    }

    log::info!(
        "technical features ({}) written for {} of {} assets ({} skipped)",
        INDICATOR_CONVENTION,
        summary.processed.len(),
        summary.universe_size,
        summary.skipped.len()
    );
    Ok(summary)
}

/// Resolves configuration once, then builds features into a CSV store rooted
/// at the configured data directory.
pub fn run_baseline_features(config: &dyn ConfigSource) -> Result<RunSummary, PipelineError> {
    let (settings, document) = config.resolve()?;
    let universe = document.universe()?;
    let store = CsvStore::new(&settings.data_dir);
    build_features(universe, &store)
}

/// Registry entry point. A partial run still counts as success.
pub fn run() -> Result<(), PipelineError> {
    let summary = run_baseline_features(&YamlConfigAdapter::default())?;
    if summary.status() == RunStatus::Partial {
        log::info!("skipped assets: {}", summary.skipped.join(", "));
    }
    Ok(())
}
