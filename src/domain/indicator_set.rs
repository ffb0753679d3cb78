//! Indicator computation for one instrument.
//!
//! [`compute_indicators`] runs every indicator family required by a
//! [`ParameterSet`] over a bar sequence and returns them keyed by
//! [`IndicatorType`]. Short inputs never fail: series that cannot fill their
//! window come back fully invalid.

use crate::domain::error::StockscanError;
use crate::domain::indicator::{
    calculate_macd, calculate_rsi, calculate_sma, IndicatorSeries, IndicatorType,
};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::params::ParameterSet;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct IndicatorSet {
    params: ParameterSet,
    bar_count: usize,
    series: HashMap<IndicatorType, IndicatorSeries>,
}

impl IndicatorSet {
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    pub fn get(&self, indicator_type: &IndicatorType) -> Option<&IndicatorSeries> {
        self.series.get(indicator_type)
    }

    pub fn short_ma(&self) -> Option<&IndicatorSeries> {
        self.get(&self.params.short_ma_type())
    }

    pub fn long_ma(&self) -> Option<&IndicatorSeries> {
        self.get(&self.params.long_ma_type())
    }

    pub fn oscillator(&self) -> Option<&IndicatorSeries> {
        self.get(&self.params.oscillator_type())
    }

    pub fn momentum(&self) -> Option<&IndicatorSeries> {
        self.get(&self.params.momentum_type())
    }
}

pub fn compute_indicators(
    ticker: &str,
    bars: &[OhlcvBar],
    params: &ParameterSet,
) -> Result<IndicatorSet, StockscanError> {
    if bars.is_empty() {
        return Err(StockscanError::NoData {
            ticker: ticker.to_string(),
        });
    }

    let series: HashMap<IndicatorType, IndicatorSeries> = params
        .indicator_types()
        .into_iter()
        .map(|t| (t, compute_series(bars, t)))
        .collect();

    if !series.values().any(IndicatorSeries::has_valid) {
        return Err(StockscanError::InsufficientHistory {
            ticker: ticker.to_string(),
            bars: bars.len(),
        });
    }

    Ok(IndicatorSet {
        params: *params,
        bar_count: bars.len(),
        series,
    })
}

fn compute_series(bars: &[OhlcvBar], indicator_type: IndicatorType) -> IndicatorSeries {
    match indicator_type {
        IndicatorType::Sma(period) => calculate_sma(bars, period),
        IndicatorType::Rsi(period) => calculate_rsi(bars, period),
        IndicatorType::Macd { fast, slow, signal } => calculate_macd(bars, fast, slow, signal),
    }
}
