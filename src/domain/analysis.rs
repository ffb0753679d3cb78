//! Per-instrument analysis pipeline and batch ranking.
//!
//! Each instrument goes fetch → indicators → scoring independently. A batch
//! runs instruments in parallel on the rayon pool, collects the outcomes in
//! input order and only then ranks them.

use crate::domain::error::StockscanError;
use crate::domain::indicator_set::compute_indicators;
use crate::domain::ohlcv::{latest_close, OhlcvBar};
use crate::domain::params::ParameterSet;
use crate::domain::scoring::{score_indicators, Signal};
use crate::ports::data_port::DataPort;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub ticker: String,
    pub name: String,
    pub close: f64,
    pub score: i32,
    pub signal: Signal,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Ranked by score, highest first; ties keep input order.
    pub results: Vec<AnalysisResult>,
    pub skipped: Vec<SkippedTicker>,
}

impl BatchOutcome {
    pub fn by_signal(&self, signal: Signal) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter(move |r| r.signal == signal)
    }
}

/// Where to fetch from and how to analyse.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub tickers: Vec<String>,
    pub period: String,
    pub interval: String,
    pub params: ParameterSet,
}

pub fn analyze_bars(
    ticker: &str,
    name: &str,
    bars: &[OhlcvBar],
    params: &ParameterSet,
) -> Result<AnalysisResult, StockscanError> {
    let close = latest_close(bars).ok_or_else(|| StockscanError::NoData {
        ticker: ticker.to_string(),
    })?;

    let indicators = compute_indicators(ticker, bars, params)?;
    let evaluation = score_indicators(&indicators);

    Ok(AnalysisResult {
        ticker: ticker.to_string(),
        name: name.to_string(),
        close,
        score: evaluation.score,
        signal: evaluation.signal,
        reason: evaluation.reason(),
    })
}

fn analyze_ticker(
    data_port: &dyn DataPort,
    ticker: &str,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, StockscanError> {
    let bars = data_port.fetch_bars(ticker, &request.period, &request.interval)?;
    let name = data_port
        .display_name(ticker)
        .unwrap_or_else(|| ticker.to_string());
    debug!(ticker, bars = bars.len(), "fetched bars");
    analyze_bars(ticker, &name, &bars, &request.params)
}

pub fn analyze_universe(data_port: &dyn DataPort, request: &AnalysisRequest) -> BatchOutcome {
    info!(
        tickers = request.tickers.len(),
        period = %request.period,
        interval = %request.interval,
        "analyzing universe"
    );

    let outcomes: Vec<(&String, Result<AnalysisResult, StockscanError>)> = request
        .tickers
        .par_iter()
        .map(|ticker| (ticker, analyze_ticker(data_port, ticker, request)))
        .collect();

    let mut batch = BatchOutcome::default();
    for (ticker, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                debug!(ticker = %ticker, score = result.score, signal = %result.signal, "scored");
                batch.results.push(result);
            }
            Err(StockscanError::NoData { .. }) => {
                warn!(ticker = %ticker, "skipping: no data");
                batch.skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::NoData,
                });
            }
            Err(e) => {
                if e.is_per_instrument() {
                    warn!(ticker = %ticker, error = %e, "skipping");
                } else {
                    error!(ticker = %ticker, error = %e, "skipping after unexpected error");
                }
                batch.skipped.push(SkippedTicker {
                    ticker: ticker.clone(),
                    reason: SkipReason::Failed(e.to_string()),
                });
            }
        }
    }

    rank_results(&mut batch.results);

    if !batch.skipped.is_empty() {
        info!(
            analyzed = batch.results.len(),
            requested = request.tickers.len(),
            "some tickers were skipped"
        );
    }

    batch
}

/// Stable sort by score, descending.
pub fn rank_results(results: &mut [AnalysisResult]) {
    results.sort_by(|a, b| b.score.cmp(&a.score));
}
