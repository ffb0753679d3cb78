//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod yaml_config_adapter;
