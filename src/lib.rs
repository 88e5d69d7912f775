//! featurepipe: technical-indicator feature pipeline over per-asset OHLCV bars.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], orchestration in [`pipeline`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod pipeline;
pub mod ports;
