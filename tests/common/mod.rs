#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use stockscan::domain::error::StockscanError;
pub use stockscan::domain::ohlcv::OhlcvBar;
use stockscan::domain::params::ParameterSet;
use stockscan::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub names: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            names: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn with_name(mut self, ticker: &str, name: &str) -> Self {
        self.names.insert(ticker.to_string(), name.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        ticker: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<OhlcvBar>, StockscanError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(StockscanError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn display_name(&self, ticker: &str) -> Option<String> {
        self.names.get(ticker).cloned()
    }
}

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn make_bar(day: i64, close: f64) -> OhlcvBar {
    OhlcvBar {
        timestamp: start_time() + Duration::days(day),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000.0,
    }
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i as i64, c))
        .collect()
}

/// 100.0, 101.0, ... one bar per day.
pub fn ascending_bars(count: usize) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..count).map(|i| 100.0 + i as f64).collect();
    bars_from_closes(&closes)
}

pub fn descending_bars(count: usize) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..count).map(|i| 200.0 - i as f64).collect();
    bars_from_closes(&closes)
}

pub fn flat_bars(count: usize, close: f64) -> Vec<OhlcvBar> {
    bars_from_closes(&vec![close; count])
}

pub fn sample_params() -> ParameterSet {
    ParameterSet {
        ma_short: 5,
        ma_long: 10,
        rsi_window: 14,
        macd_fast: 12,
        macd_slow: 26,
        macd_signal: 9,
    }
}

pub fn csv_content(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.timestamp.format("%Y-%m-%d"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    out
}
