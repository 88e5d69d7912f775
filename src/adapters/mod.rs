//! Concrete adapter implementations for ports.

pub mod csv_store_adapter;
pub mod yaml_config_adapter;
