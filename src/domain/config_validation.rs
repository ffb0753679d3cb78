//! Configuration validation.
//!
//! Turns the raw settings document into a [`ParameterSet`]. Missing or
//! malformed window keys are reported by name; nothing is defaulted here.

use crate::domain::config::{SETTINGS_SECTION, Settings, TICKERS_KEY};
use crate::domain::error::StockscanError;
use crate::domain::params::ParameterSet;
use crate::domain::universe::dedup_tickers;
use crate::ports::config_port::ConfigPort;

pub const WINDOW_KEYS: [&str; 6] = [
    "ma_short",
    "ma_long",
    "rsi_window",
    "macd_fast",
    "macd_slow",
    "macd_signal",
];

/// Windows and tickers of a document, or the first problem found.
pub fn validate_settings(
    config: &dyn ConfigPort,
) -> Result<(ParameterSet, Vec<String>), StockscanError> {
    let params = build_parameter_set(config)?;
    let tickers = resolve_tickers(config)?;
    Ok((params, tickers))
}

pub fn build_parameter_set(config: &dyn ConfigPort) -> Result<ParameterSet, StockscanError> {
    let params = ParameterSet {
        ma_short: read_window(config, "ma_short")?,
        ma_long: read_window(config, "ma_long")?,
        rsi_window: read_window(config, "rsi_window")?,
        macd_fast: read_window(config, "macd_fast")?,
        macd_slow: read_window(config, "macd_slow")?,
        macd_signal: read_window(config, "macd_signal")?,
    };

    if params.ma_short >= params.ma_long {
        tracing::warn!(
            ma_short = params.ma_short,
            ma_long = params.ma_long,
            "ma_short is not shorter than ma_long"
        );
    }
    if params.macd_fast >= params.macd_slow {
        tracing::warn!(
            macd_fast = params.macd_fast,
            macd_slow = params.macd_slow,
            "macd_fast is not faster than macd_slow"
        );
    }

    Ok(params)
}

fn read_window(config: &dyn ConfigPort, key: &str) -> Result<usize, StockscanError> {
    let value = config
        .get_integer(SETTINGS_SECTION, key)
        .ok_or_else(|| StockscanError::ConfigMissing {
            section: SETTINGS_SECTION.to_string(),
            key: key.to_string(),
        })?
        .map_err(|raw| StockscanError::ConfigInvalid {
            section: SETTINGS_SECTION.to_string(),
            key: key.to_string(),
            reason: format!("expected a positive integer, got '{}'", raw),
        })?;

    if value < 1 {
        return Err(StockscanError::ConfigInvalid {
            section: SETTINGS_SECTION.to_string(),
            key: key.to_string(),
            reason: format!("{} must be a positive integer", key),
        });
    }

    usize::try_from(value).map_err(|_| StockscanError::ConfigInvalid {
        section: SETTINGS_SECTION.to_string(),
        key: key.to_string(),
        reason: "value out of range".to_string(),
    })
}

/// The configured instrument list, duplicates removed. An absent key is an
/// error, an empty list is not.
pub fn resolve_tickers(config: &dyn ConfigPort) -> Result<Vec<String>, StockscanError> {
    config
        .get_list(TICKERS_KEY)
        .map(dedup_tickers)
        .ok_or_else(|| StockscanError::ConfigMissing {
            section: "root".to_string(),
            key: TICKERS_KEY.to_string(),
        })
}

/// `period` forwarded to the data source; falls back to the built-in default.
pub fn resolve_period(config: &dyn ConfigPort) -> String {
    config
        .get_string(SETTINGS_SECTION, "period")
        .unwrap_or_else(|| Settings::default().period)
}

/// `interval` forwarded to the data source; falls back to the built-in default.
pub fn resolve_interval(config: &dyn ConfigPort) -> String {
    config
        .get_string(SETTINGS_SECTION, "interval")
        .unwrap_or_else(|| Settings::default().interval)
}
