//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::yaml_config_adapter::YamlConfigAdapter;
use crate::domain::analysis::{
    analyze_universe, AnalysisRequest, AnalysisResult, BatchOutcome, SkipReason,
};
use crate::domain::config::TICKERS_KEY;
use crate::domain::config_validation::{
    build_parameter_set, resolve_interval, resolve_period, resolve_tickers, validate_settings,
};
use crate::domain::error::StockscanError;
use crate::domain::scoring::Signal;
use crate::domain::universe::{merge_tickers, parse_tickers};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

pub const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "stockscan", about = "Technical-indicator stock screener")]
pub struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score and rank the configured tickers
    Analyze {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Directory of per-ticker CSV files
        #[arg(short, long)]
        data: PathBuf,
        /// Comma or space separated tickers, replacing the configured list
        #[arg(long)]
        tickers: Option<String>,
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        interval: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Save tickers as the configured watch list
    Favorites {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Add to the saved list instead of replacing it
        #[arg(long)]
        append: bool,
        #[arg(required = true)]
        tickers: Vec<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            data,
            tickers,
            period,
            interval,
        } => run_analyze(
            &config,
            &data,
            tickers.as_deref(),
            period.as_deref(),
            interval.as_deref(),
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Favorites {
            config,
            append,
            tickers,
        } => run_favorites(&config, &tickers, append),
    }
}

pub fn load_config(path: &Path) -> Result<YamlConfigAdapter, ExitCode> {
    YamlConfigAdapter::load_or_default(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Resolves the run parameters, command-line overrides first.
pub fn build_request(
    config: &dyn ConfigPort,
    tickers_override: Option<&str>,
    period_override: Option<&str>,
    interval_override: Option<&str>,
) -> Result<AnalysisRequest, StockscanError> {
    let params = build_parameter_set(config)?;

    let tickers = match tickers_override {
        Some(raw) => parse_tickers(raw),
        None => resolve_tickers(config)?,
    };
    if tickers.is_empty() {
        return Err(StockscanError::ConfigInvalid {
            section: "root".to_string(),
            key: TICKERS_KEY.to_string(),
            reason: "no tickers to analyze".to_string(),
        });
    }

    Ok(AnalysisRequest {
        tickers,
        period: period_override
            .map(str::to_string)
            .unwrap_or_else(|| resolve_period(config)),
        interval: interval_override
            .map(str::to_string)
            .unwrap_or_else(|| resolve_interval(config)),
        params,
    })
}

fn run_analyze(
    config_path: &Path,
    data_dir: &Path,
    tickers: Option<&str>,
    period: Option<&str>,
    interval: Option<&str>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let request = match build_request(&config, tickers, period, interval) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match CsvAdapter::new(data_dir.to_path_buf()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    run_analysis(&data_port, &request)
}

/// Runs the batch and prints the report on stdout. Fails with the no-data
/// exit code when not a single instrument could be scored.
pub fn run_analysis(data_port: &dyn DataPort, request: &AnalysisRequest) -> ExitCode {
    let batch = analyze_universe(data_port, request);

    for skipped in &batch.skipped {
        match &skipped.reason {
            SkipReason::NoData => eprintln!("warning: {}: no data", skipped.ticker),
            SkipReason::Failed(reason) => eprintln!("warning: {}: {}", skipped.ticker, reason),
        }
    }

    if batch.results.is_empty() {
        let err = StockscanError::NoData {
            ticker: request.tickers.join(","),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    print!("{}", format_report(&batch));
    ExitCode::SUCCESS
}

pub fn format_report(batch: &BatchOutcome) -> String {
    let mut out = format_ranking(&batch.results);
    out.push('\n');
    out.push_str(&format_alerts(batch));
    out
}

/// Fixed-width ranking table, one row per result in the given order.
pub fn format_ranking(results: &[AnalysisResult]) -> String {
    let ticker_w = results
        .iter()
        .map(|r| r.ticker.chars().count())
        .max()
        .unwrap_or(0)
        .max("TICKER".len());
    let name_w = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<tw$}  {:<nw$}  {:>10}  {:>5}  {:<6}  REASON",
        "TICKER",
        "NAME",
        "CLOSE",
        "SCORE",
        "SIGNAL",
        tw = ticker_w,
        nw = name_w
    );
    for r in results {
        let line = format!(
            "{:<tw$}  {:<nw$}  {:>10.2}  {:>+5}  {:<6}  {}",
            r.ticker,
            r.name,
            r.close,
            r.score,
            r.signal,
            r.reason,
            tw = ticker_w,
            nw = name_w
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// BUY and SELL lists in ranking order.
pub fn format_alerts(batch: &BatchOutcome) -> String {
    let mut out = String::new();
    for signal in [Signal::Buy, Signal::Sell] {
        let hits: Vec<&AnalysisResult> = batch.by_signal(signal).collect();
        let _ = writeln!(out, "{} ({}):", signal, hits.len());
        if hits.is_empty() {
            let _ = writeln!(out, "  -");
        }
        for r in hits {
            let _ = writeln!(out, "  {} {} ({:+}) {:.2}", r.ticker, r.name, r.score, r.close);
        }
    }
    out
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let (params, tickers) = match validate_settings(&config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("Tickers:  {}", tickers.join(", "));
    println!("Period:   {}", resolve_period(&config));
    println!("Interval: {}", resolve_interval(&config));
    println!("Indicators:");
    for indicator in params.indicator_types() {
        println!(
            "  {:<14} warm-up {:>3}  {}",
            indicator.to_string(),
            indicator.warmup(),
            indicator.column_names().join(", ")
        );
    }
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

/// Normalizes `raw` and stores it as the ticker list of the document at
/// `path`, creating the file from defaults when absent. With `append` the
/// new symbols go after the ones already saved.
pub fn save_favorites(
    path: &Path,
    raw: &[String],
    append: bool,
) -> Result<Vec<String>, StockscanError> {
    let selected = parse_tickers(&raw.join(" "));
    if selected.is_empty() {
        return Err(StockscanError::ConfigInvalid {
            section: "root".to_string(),
            key: TICKERS_KEY.to_string(),
            reason: "no tickers given".to_string(),
        });
    }

    let mut config = YamlConfigAdapter::load_or_default(path)?;
    let tickers = if append {
        let existing = config.get_list(TICKERS_KEY).unwrap_or_default();
        merge_tickers(&existing, &selected)
    } else {
        selected
    };
    config.set_tickers(&tickers);
    config.save(path)?;
    Ok(tickers)
}

fn run_favorites(config_path: &Path, raw: &[String], append: bool) -> ExitCode {
    match save_favorites(config_path, raw, append) {
        Ok(tickers) => {
            eprintln!(
                "Saved {} tickers to {}: {}",
                tickers.len(),
                config_path.display(),
                tickers.join(", ")
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
