//! Time-series store port.

use crate::domain::error::PipelineError;
use crate::domain::features::FeatureRow;
use crate::domain::ohlcv::Bar;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    RawPrices,
    TechnicalFeatures,
}

impl Category {
    /// Path segments of the category below the store root.
    pub fn segments(&self) -> [&'static str; 2] {
        match self {
            Category::RawPrices => ["raw", "prices"],
            Category::TechnicalFeatures => ["features", "tech"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::RawPrices => f.write_str("raw prices"),
            Category::TechnicalFeatures => f.write_str("technical features"),
        }
    }
}

pub trait SeriesStore {
    /// Deterministic location of `asset` under `category`. No side effects.
    fn location(&self, category: Category, asset: &str) -> PathBuf;

    /// Raw bars for `asset`, or `None` when the store holds nothing for it.
    fn read_raw_series(&self, asset: &str) -> Result<Option<Vec<Bar>>, PipelineError>;

    /// Replaces whatever is stored for `asset` under `category` with `rows`.
    fn write_feature_frame(
        &self,
        asset: &str,
        category: Category,
        rows: &[FeatureRow],
    ) -> Result<PathBuf, PipelineError>;
}
