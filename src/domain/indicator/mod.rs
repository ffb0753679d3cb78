//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: A time series of indicator values
//!
//! Every calculator returns one point per input bar. Points inside the
//! warm-up window carry `valid: false` and a placeholder value.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::ema_values;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDateTime,
    pub valid: bool,
    pub value: IndicatorValue,
}

impl IndicatorPoint {
    pub(crate) fn invalid(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            valid: false,
            value: IndicatorValue::Simple(0.0),
        }
    }

    pub(crate) fn simple(timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            timestamp,
            valid: true,
            value: IndicatorValue::Simple(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl IndicatorType {
    /// Number of bars needed before the first valid point.
    pub fn warmup(&self) -> usize {
        match self {
            IndicatorType::Sma(period) | IndicatorType::Rsi(period) => period.saturating_sub(1),
            IndicatorType::Macd { .. } => 0,
        }
    }

    /// Flat column names used in exported tables, e.g. `SMA_25`, or
    /// `MACD_12_26_9` and `MACDs_12_26_9` for the momentum pair.
    pub fn column_names(&self) -> Vec<String> {
        match self {
            IndicatorType::Sma(period) => vec![format!("SMA_{}", period)],
            IndicatorType::Rsi(period) => vec![format!("RSI_{}", period)],
            IndicatorType::Macd { fast, slow, signal } => vec![
                format!("MACD_{}_{}_{}", fast, slow, signal),
                format!("MACDs_{}_{}_{}", fast, slow, signal),
            ],
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub(crate) fn all_invalid(indicator_type: IndicatorType, timestamps: &[NaiveDateTime]) -> Self {
        Self {
            indicator_type,
            values: timestamps.iter().map(|&t| IndicatorPoint::invalid(t)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_valid(&self) -> bool {
        self.values.iter().any(|p| p.valid)
    }

    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(|p| p.valid)
    }

    /// Count of undefined points before the first valid one (the whole
    /// series when nothing is valid).
    pub fn leading_invalid(&self) -> usize {
        self.first_valid_index().unwrap_or(self.values.len())
    }

    /// Scalar value at `index`, `None` when out of range or still warming up.
    pub fn simple_at(&self, index: usize) -> Option<f64> {
        match self.values.get(index) {
            Some(IndicatorPoint {
                valid: true,
                value: IndicatorValue::Simple(v),
                ..
            }) => Some(*v),
            _ => None,
        }
    }

    /// `(line, signal)` at `index` for momentum series.
    pub fn macd_at(&self, index: usize) -> Option<(f64, f64)> {
        match self.values.get(index) {
            Some(IndicatorPoint {
                valid: true,
                value: IndicatorValue::Macd { line, signal, .. },
                ..
            }) => Some((*line, *signal)),
            _ => None,
        }
    }
}
