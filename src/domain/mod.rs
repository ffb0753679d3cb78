//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod params;
pub mod indicator_set;
pub mod scoring;
pub mod analysis;
pub mod universe;
pub mod config;
pub mod config_validation;
pub mod error;
