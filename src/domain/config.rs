//! Persisted configuration document shape and its built-in defaults.
//!
//! Key names are part of the on-disk format and must not change:
//!
//! ```yaml
//! tickers: ["7203.T", "9984.T", "AAPL", "NVDA"]
//! settings:
//!   period: 1y
//!   interval: 1d
//!   ma_short: 25
//!   ma_long: 75
//!   rsi_window: 14
//!   macd_fast: 12
//!   macd_slow: 26
//!   macd_signal: 9
//! ```

use serde::{Deserialize, Serialize};

pub const TICKERS_KEY: &str = "tickers";
pub const SETTINGS_SECTION: &str = "settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub tickers: Vec<String>,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub period: String,
    pub interval: String,
    pub ma_short: u32,
    pub ma_long: u32,
    pub rsi_window: u32,
    pub macd_fast: u32,
    pub macd_slow: u32,
    pub macd_signal: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tickers: ["7203.T", "9984.T", "AAPL", "NVDA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            period: "1y".to_string(),
            interval: "1d".to_string(),
            ma_short: 25,
            ma_long: 75,
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}
