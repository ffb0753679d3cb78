//! Indicator window parameters shared by the indicator and scoring engines.

use crate::domain::indicator::IndicatorType;

/// Validated window sizes. Construct through
/// [`build_parameter_set`](crate::domain::config_validation::build_parameter_set)
/// when reading user configuration; every field is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSet {
    pub ma_short: usize,
    pub ma_long: usize,
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl ParameterSet {
    pub fn short_ma_type(&self) -> IndicatorType {
        IndicatorType::Sma(self.ma_short)
    }

    pub fn long_ma_type(&self) -> IndicatorType {
        IndicatorType::Sma(self.ma_long)
    }

    pub fn oscillator_type(&self) -> IndicatorType {
        IndicatorType::Rsi(self.rsi_window)
    }

    pub fn momentum_type(&self) -> IndicatorType {
        IndicatorType::Macd {
            fast: self.macd_fast,
            slow: self.macd_slow,
            signal: self.macd_signal,
        }
    }

    /// Distinct indicators to compute, in reporting order.
    pub fn indicator_types(&self) -> Vec<IndicatorType> {
        let mut types = vec![self.short_ma_type()];
        for t in [self.long_ma_type(), self.oscillator_type(), self.momentum_type()] {
            if !types.contains(&t) {
                types.push(t);
            }
        }
        types
    }
}
