//! Gain/loss oscillator ("RSI" in reports).
//!
//! Simple rolling means of gains and losses over the trailing n bars:
//! - change[i] = C[i] - C[i-1]; the first bar has no change and counts as 0
//! - gain = max(change, 0), loss = max(-change, 0)
//! - ratio = mean(gain) / mean(loss)
//!
//! Formula: value = 100 - 100 / (100 + ratio)
//!
//! This is not Wilder's 100 - 100 / (1 + ratio). The 30/70 scoring
//! thresholds were set against this mapping, so the two change together or
//! not at all.
//!
//! If mean(loss) == 0 and mean(gain) > 0 the ratio diverges: value = 100.
//! If both means are 0 the ratio is 0/0 and the point stays invalid.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

/// Value emitted when average losses are zero but average gains are not.
pub const DIVERGENCE_SENTINEL: f64 = 100.0;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let indicator_type = IndicatorType::Rsi(period);

    if period == 0 || bars.len() < period {
        let timestamps: Vec<_> = bars.iter().map(|b| b.timestamp).collect();
        return IndicatorSeries::all_invalid(indicator_type, &timestamps);
    }

    let mut gains: Vec<f64> = Vec::with_capacity(bars.len());
    let mut losses: Vec<f64> = Vec::with_capacity(bars.len());
    gains.push(0.0);
    losses.push(0.0);

    for pair in bars.windows(2) {
        let change = pair[1].close - pair[0].close;
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        if i + 1 < period {
            values.push(IndicatorPoint::invalid(bar.timestamp));
            continue;
        }

        let start = i + 1 - period;
        let avg_gain = gains[start..=i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[start..=i].iter().sum::<f64>() / period as f64;

        match oscillator_value(avg_gain, avg_loss) {
            Some(v) => values.push(IndicatorPoint::simple(bar.timestamp, v)),
            None => values.push(IndicatorPoint::invalid(bar.timestamp)),
        }
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}

fn oscillator_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        return None;
    }
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 {
            Some(DIVERGENCE_SENTINEL)
        } else {
            None
        };
    }
    let ratio = avg_gain / avg_loss;
    if !ratio.is_finite() {
        return None;
    }
    Some(100.0 - (100.0 / (100.0 + ratio)))
}
