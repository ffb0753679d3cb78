//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]).
//! Warmup: first (n-1) bars are invalid; the whole series is invalid when
//! fewer than n bars are available.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::{closes, OhlcvBar};

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Sma(period);

    if period == 0 || bars.len() < period {
        let timestamps: Vec<_> = bars.iter().map(|b| b.timestamp).collect();
        return IndicatorSeries::all_invalid(indicator_type, &timestamps);
    }

    let closes = closes(bars);
    let mut values: Vec<IndicatorPoint> = bars[..period - 1]
        .iter()
        .map(|b| IndicatorPoint::invalid(b.timestamp))
        .collect();

    // Summed per window, no running total to drift.
    for (window, bar) in closes.windows(period).zip(&bars[period - 1..]) {
        let mean = window.iter().sum::<f64>() / period as f64;
        values.push(IndicatorPoint::simple(bar.timestamp, mean));
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}
