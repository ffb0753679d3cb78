//! Ticker list parsing.
//!
//! Accepts free-form user input: symbols separated by commas, spaces or
//! newlines. Four-digit codes are Tokyo listings and get the `.T` suffix.

use std::collections::HashSet;

pub const TOKYO_SUFFIX: &str = ".T";

pub fn parse_tickers(input: &str) -> Vec<String> {
    let tokens = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(normalize_ticker);
    dedup_tickers(tokens)
}

/// Upper-cases a symbol and qualifies bare four-digit codes.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return None;
    }
    if symbol.len() == 4 && symbol.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("{}{}", symbol, TOKYO_SUFFIX));
    }
    Some(symbol)
}

/// `existing` followed by `extra`, duplicates removed, first occurrence wins.
pub fn merge_tickers(existing: &[String], extra: &[String]) -> Vec<String> {
    dedup_tickers(existing.iter().chain(extra).cloned())
}

/// Drops exact repeats, keeping the first occurrence of each symbol.
pub fn dedup_tickers(tickers: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
