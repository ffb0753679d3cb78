//! CSV directory data adapter.
//!
//! Reads one file per instrument from a base directory, looked up as
//! `<TICKER>_<interval>.csv` first and `<TICKER>.csv` second. An optional
//! `names.csv` (`ticker,name`) supplies display names.

use crate::domain::error::StockscanError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

pub const NAMES_FILE: &str = "names.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
    names: HashMap<String, String>,
}

/// How much trailing history a `period` string asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    Days(u32),
    Months(u32),
    YearToDate,
    Max,
}

impl Lookback {
    /// Parses `Nd`, `Nwk`, `Nmo`, `Ny`, `ytd` and `max`.
    pub fn parse(period: &str) -> Option<Self> {
        let period = period.trim().to_ascii_lowercase();
        match period.as_str() {
            "max" => return Some(Lookback::Max),
            "ytd" => return Some(Lookback::YearToDate),
            _ => {}
        }

        let count = |digits: &str| digits.parse::<u32>().ok().filter(|n| *n > 0);
        if let Some(n) = period.strip_suffix("wk") {
            count(n).map(|n| Lookback::Days(n.saturating_mul(7)))
        } else if let Some(n) = period.strip_suffix("mo") {
            count(n).map(Lookback::Months)
        } else if let Some(n) = period.strip_suffix('d') {
            count(n).map(Lookback::Days)
        } else if let Some(n) = period.strip_suffix('y') {
            count(n).map(|n| Lookback::Months(n.saturating_mul(12)))
        } else {
            None
        }
    }

    /// Earliest timestamp kept when the series ends at `last`.
    fn cutoff(self, last: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Lookback::Max => None,
            Lookback::Days(n) => last.checked_sub_signed(Duration::days(i64::from(n))),
            Lookback::Months(n) => last.checked_sub_months(Months::new(n)),
            Lookback::YearToDate => {
                NaiveDate::from_ymd_opt(last.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        }
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Result<Self, StockscanError> {
        if !base_path.is_dir() {
            return Err(StockscanError::DataSource {
                reason: format!("data directory {} does not exist", base_path.display()),
            });
        }
        let names = load_names(&base_path.join(NAMES_FILE))?;
        Ok(Self { base_path, names })
    }

    fn csv_path(&self, ticker: &str, interval: &str) -> Option<PathBuf> {
        [
            format!("{}_{}.csv", ticker, interval),
            format!("{}.csv", ticker),
        ]
        .into_iter()
        .map(|name| self.base_path.join(name))
        .find(|path| path.is_file())
    }
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        ticker: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<OhlcvBar>, StockscanError> {
        let Some(path) = self.csv_path(ticker, interval) else {
            tracing::debug!(ticker, interval, "no csv file");
            return Ok(Vec::new());
        };

        let content = fs::read_to_string(&path).map_err(|e| StockscanError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let bars = parse_bars(&content).map_err(|reason| StockscanError::DataSource {
            reason: format!("{}: {}", path.display(), reason),
        })?;

        let lookback = Lookback::parse(period).unwrap_or_else(|| {
            tracing::warn!(period, "unrecognised period, using full history");
            Lookback::Max
        });
        Ok(trim_to_period(bars, lookback))
    }

    fn display_name(&self, ticker: &str) -> Option<String> {
        self.names.get(ticker).cloned()
    }
}

fn load_names(path: &Path) -> Result<HashMap<String, String>, StockscanError> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let mut rdr = csv::Reader::from_path(path).map_err(|e| StockscanError::DataSource {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut names = HashMap::new();
    for result in rdr.records() {
        let record = result.map_err(|e| StockscanError::DataSource {
            reason: format!("{}: {}", path.display(), e),
        })?;
        if let (Some(ticker), Some(name)) = (record.get(0), record.get(1)) {
            let name = name.trim();
            if !name.is_empty() {
                names.insert(ticker.trim().to_uppercase(), name.to_string());
            }
        }
    }
    Ok(names)
}

struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, String> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_ascii_lowercase().as_str()))
                .ok_or_else(|| format!("missing {} column", names[0]))
        };
        Ok(Self {
            date: find(&["date", "datetime", "timestamp"])?,
            open: find(&["open"])?,
            high: find(&["high"])?,
            low: find(&["low"])?,
            close: find(&["close"])?,
            volume: find(&["volume"])?,
        })
    }
}

/// Parses the whole file. Rows without a close are dropped, and a row with a
/// non-finite price or a negative close is an error. The result is ascending
/// with one bar per timestamp (the last row wins).
pub fn parse_bars(content: &str) -> Result<Vec<OhlcvBar>, String> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| format!("CSV parse error: {}", e))?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut by_time = BTreeMap::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| format!("CSV parse error: {}", e))?;
        let row = line + 2;

        let close = match record.get(columns.close).map(str::trim) {
            None | Some("") => continue,
            Some(raw) => parse_number(raw, "close", row)?,
        };
        if close.is_nan() {
            continue;
        }

        let timestamp = parse_timestamp(record.get(columns.date).unwrap_or(""))
            .ok_or_else(|| format!("row {}: invalid date", row))?;
        let field = |idx: usize, name: &str| {
            parse_number(record.get(idx).unwrap_or("").trim(), name, row)
        };

        let bar = OhlcvBar {
            timestamp,
            open: field(columns.open, "open")?,
            high: field(columns.high, "high")?,
            low: field(columns.low, "low")?,
            close,
            volume: field(columns.volume, "volume")?,
        };
        check_prices(&bar, row)?;
        by_time.insert(timestamp, bar);
    }

    Ok(by_time.into_values().collect())
}

/// Prices must be finite and the close non-negative.
fn check_prices(bar: &OhlcvBar, row: usize) -> Result<(), String> {
    let prices = [
        ("open", bar.open),
        ("high", bar.high),
        ("low", bar.low),
        ("close", bar.close),
    ];
    if let Some((name, value)) = prices.iter().find(|(_, v)| !v.is_finite()) {
        return Err(format!("row {}: non-finite {} value {}", row, name, value));
    }
    if bar.close < 0.0 {
        return Err(format!("row {}: negative close {}", row, bar.close));
    }
    Ok(())
}

fn parse_number(raw: &str, name: &str, row: usize) -> Result<f64, String> {
    raw.parse()
        .map_err(|e| format!("row {}: invalid {} value '{}': {}", row, name, raw, e))
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339. Offsets are
/// dropped, keeping the exchange-local wall clock.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(ts);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.naive_local())
}

pub fn trim_to_period(bars: Vec<OhlcvBar>, lookback: Lookback) -> Vec<OhlcvBar> {
    let Some(cutoff) = bars.last().and_then(|b| lookback.cutoff(b.timestamp)) else {
        return bars;
    };
    bars.into_iter().filter(|b| b.timestamp >= cutoff).collect()
}
