//! Rule-based scoring of the latest indicator readings.
//!
//! # Evaluation Semantics
//!
//! - Rules are evaluated in list order; each fired rule adds +1 (bullish) or
//!   -1 (bearish) to the score and appends its clause to the reason text
//! - A rule whose inputs are undefined (warm-up, 0/0 oscillator) is skipped
//! - All comparisons are strict: equal readings fire nothing
//! - Score > 0 → BUY, < 0 → SELL, 0 → HOLD

use crate::domain::indicator_set::IndicatorSet;
use std::fmt;

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

pub const REASON_SEPARATOR: &str = ", ";

/// Indicator values at one bar. `None` means undefined at that bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub oscillator: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
}

impl Readings {
    pub fn at(indicators: &IndicatorSet, index: usize) -> Self {
        let momentum = indicators.momentum().and_then(|s| s.macd_at(index));
        Self {
            short_ma: indicators.short_ma().and_then(|s| s.simple_at(index)),
            long_ma: indicators.long_ma().and_then(|s| s.simple_at(index)),
            oscillator: indicators.oscillator().and_then(|s| s.simple_at(index)),
            macd_line: momentum.map(|(line, _)| line),
            macd_signal: momentum.map(|(_, signal)| signal),
        }
    }
}

/// Latest readings plus those of the bar before, for rules that look at
/// direction or crossovers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringContext {
    pub latest: Readings,
    pub prior: Readings,
}

impl ScoringContext {
    pub fn from_indicators(indicators: &IndicatorSet) -> Self {
        let count = indicators.bar_count();
        let latest = match count.checked_sub(1) {
            Some(i) => Readings::at(indicators, i),
            None => Readings::default(),
        };
        let prior = match count.checked_sub(2) {
            Some(i) => Readings::at(indicators, i),
            None => Readings::default(),
        };
        Self { latest, prior }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Bullish,
    Bearish,
}

impl Bias {
    pub fn weight(self) -> i32 {
        match self {
            Bias::Bullish => 1,
            Bias::Bearish => -1,
        }
    }
}

/// One entry of a scoring table. `condition` returns `None` when the inputs
/// it needs are undefined.
#[derive(Clone, Copy)]
pub struct ScoringRule {
    pub label: &'static str,
    pub bias: Bias,
    pub clause: &'static str,
    pub condition: fn(&ScoringContext) -> Option<bool>,
}

impl fmt::Debug for ScoringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringRule")
            .field("label", &self.label)
            .field("bias", &self.bias)
            .field("clause", &self.clause)
            .finish_non_exhaustive()
    }
}

fn above(left: Option<f64>, right: Option<f64>) -> Option<bool> {
    Some(left? > right?)
}

fn below(left: Option<f64>, right: Option<f64>) -> Option<bool> {
    Some(left? < right?)
}

pub const DEFAULT_RULES: &[ScoringRule] = &[
    ScoringRule {
        label: "trend_up",
        bias: Bias::Bullish,
        clause: "Short MA above long MA (uptrend)",
        condition: |ctx| above(ctx.latest.short_ma, ctx.latest.long_ma),
    },
    ScoringRule {
        label: "trend_down",
        bias: Bias::Bearish,
        clause: "Short MA below long MA (downtrend)",
        condition: |ctx| below(ctx.latest.short_ma, ctx.latest.long_ma),
    },
    ScoringRule {
        label: "oversold",
        bias: Bias::Bullish,
        clause: "RSI oversold (<30)",
        condition: |ctx| below(ctx.latest.oscillator, Some(OVERSOLD)),
    },
    ScoringRule {
        label: "overbought",
        bias: Bias::Bearish,
        clause: "RSI overbought (>70)",
        condition: |ctx| above(ctx.latest.oscillator, Some(OVERBOUGHT)),
    },
    ScoringRule {
        label: "momentum_up",
        bias: Bias::Bullish,
        clause: "MACD above signal line",
        condition: |ctx| above(ctx.latest.macd_line, ctx.latest.macd_signal),
    },
    ScoringRule {
        label: "momentum_down",
        bias: Bias::Bearish,
        clause: "MACD below signal line",
        condition: |ctx| below(ctx.latest.macd_line, ctx.latest.macd_signal),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => Signal::Buy,
            s if s < 0 => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    pub signal: Signal,
    pub clauses: Vec<&'static str>,
}

impl Evaluation {
    pub fn reason(&self) -> String {
        self.clauses.join(REASON_SEPARATOR)
    }
}

pub fn evaluate(ctx: &ScoringContext, rules: &[ScoringRule]) -> Evaluation {
    let mut score = 0;
    let mut clauses = Vec::new();

    for rule in rules {
        if (rule.condition)(ctx) == Some(true) {
            score += rule.bias.weight();
            clauses.push(rule.clause);
        }
    }

    Evaluation {
        score,
        signal: Signal::from_score(score),
        clauses,
    }
}

/// Score an instrument's indicators with [`DEFAULT_RULES`].
pub fn score_indicators(indicators: &IndicatorSet) -> Evaluation {
    evaluate(&ScoringContext::from_indicators(indicators), DEFAULT_RULES)
}
