//! Port traits for the store and configuration boundaries.

pub mod config_port;
pub mod store_port;
