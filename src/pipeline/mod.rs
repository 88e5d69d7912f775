//! Pipeline orchestration: named step chains, the step registry and the runner.

pub mod baseline_features;
pub mod dag;
pub mod registry;
pub mod runner;
