//! Core domain types and logic.

pub mod error;
pub mod features;
pub mod frame_meta;
pub mod indicator;
pub mod interpolate;
pub mod ohlcv;
pub mod sentiment;
pub mod settings;
pub mod timestamp;
