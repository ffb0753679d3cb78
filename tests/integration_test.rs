//! Integration tests for the screening pipeline.
//!
//! Tests cover:
//! - End-to-end scoring of known price shapes through `analyze_universe`
//! - Per-ticker error isolation and skip reporting
//! - Stable ranking across the parallel batch
//! - Indicator warm-up and shape properties (proptest)
//! - Score negation symmetry over mirrored readings (proptest)

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use stockscan::domain::analysis::{analyze_universe, AnalysisRequest, SkipReason};
use stockscan::domain::indicator::{calculate_macd, calculate_rsi, calculate_sma, IndicatorValue};
use stockscan::domain::indicator_set::compute_indicators;
use stockscan::domain::params::ParameterSet;
use stockscan::domain::scoring::{
    evaluate, score_indicators, Readings, ScoringContext, Signal, DEFAULT_RULES,
};

fn request(tickers: &[&str], params: ParameterSet) -> AnalysisRequest {
    AnalysisRequest {
        tickers: tickers.iter().map(|t| t.to_string()).collect(),
        period: "1y".to_string(),
        interval: "1d".to_string(),
        params,
    }
}

mod end_to_end {
    use super::*;

    #[test]
    fn ascending_prices() {
        let port = MockDataPort::new()
            .with_bars("UP", ascending_bars(30))
            .with_name("UP", "Rising Co");

        let batch = analyze_universe(&port, &request(&["UP"], sample_params()));

        assert_eq!(batch.results.len(), 1);
        let res = &batch.results[0];
        assert_eq!(res.ticker, "UP");
        assert_eq!(res.name, "Rising Co");
        assert_eq!(res.close, 129.0);
        // uptrend and MACD above signal, offset by the saturated oscillator
        assert_eq!(res.score, 1);
        assert_eq!(res.signal, Signal::Buy);
        assert_eq!(
            res.reason,
            "Short MA above long MA (uptrend), RSI overbought (>70), MACD above signal line"
        );
    }

    #[test]
    fn ascending_indicator_readings() {
        let set = compute_indicators("UP", &ascending_bars(30), &sample_params()).unwrap();
        let latest = ScoringContext::from_indicators(&set).latest;

        assert_relative_eq!(latest.short_ma.unwrap(), 127.0);
        assert_relative_eq!(latest.long_ma.unwrap(), 124.5);
        assert_eq!(latest.oscillator, Some(100.0));
        assert!(latest.macd_line.unwrap() > latest.macd_signal.unwrap());
    }

    #[test]
    fn flat_prices_hold() {
        let port = MockDataPort::new().with_bars("FLAT", flat_bars(30, 100.0));

        let batch = analyze_universe(&port, &request(&["FLAT"], sample_params()));

        let res = &batch.results[0];
        assert_eq!(res.score, 0);
        assert_eq!(res.signal, Signal::Hold);
        assert_eq!(res.reason, "");
        assert_eq!(res.name, "FLAT");
    }

    #[test]
    fn flat_prices_leave_oscillator_undefined() {
        let set = compute_indicators("FLAT", &flat_bars(30, 100.0), &sample_params()).unwrap();
        assert!(!set.oscillator().unwrap().has_valid());
        let latest = ScoringContext::from_indicators(&set).latest;
        assert_eq!(latest.macd_line, Some(0.0));
        assert_eq!(latest.macd_signal, Some(0.0));
    }

    #[test]
    fn descending_prices_sell() {
        let port = MockDataPort::new().with_bars("DOWN", descending_bars(40));

        let batch = analyze_universe(&port, &request(&["DOWN"], sample_params()));

        let res = &batch.results[0];
        assert_eq!(res.score, -3);
        assert_eq!(res.signal, Signal::Sell);
        assert_eq!(
            res.reason,
            "Short MA below long MA (downtrend), RSI overbought (>70), MACD below signal line"
        );
    }

    #[test]
    fn short_history_scores_available_rules_only() {
        // 8 bars: long MA (10) and oscillator (14) still warming up
        let port = MockDataPort::new().with_bars("NEW", ascending_bars(8));

        let batch = analyze_universe(&port, &request(&["NEW"], sample_params()));

        let res = &batch.results[0];
        assert_eq!(res.score, 1);
        assert_eq!(res.reason, "MACD above signal line");
    }
}

mod batch {
    use super::*;

    #[test]
    fn empty_ticker_is_skipped() {
        let port = MockDataPort::new()
            .with_bars("EMPTY", vec![])
            .with_bars("UP", ascending_bars(30));

        let batch = analyze_universe(&port, &request(&["EMPTY", "UP"], sample_params()));

        assert_eq!(batch.results.len(), 1);
        assert_eq!(batch.results[0].ticker, "UP");
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].ticker, "EMPTY");
        assert_eq!(batch.skipped[0].reason, SkipReason::NoData);
    }

    #[test]
    fn fetch_error_is_isolated() {
        let port = MockDataPort::new()
            .with_error("BROKEN", "connection reset")
            .with_bars("UP", ascending_bars(30))
            .with_bars("DOWN", descending_bars(30));

        let batch = analyze_universe(&port, &request(&["BROKEN", "UP", "DOWN"], sample_params()));

        assert_eq!(batch.results.len(), 2);
        assert_eq!(batch.skipped.len(), 1);
        match &batch.skipped[0].reason {
            SkipReason::Failed(reason) => assert!(reason.contains("connection reset")),
            other => panic!("unexpected skip reason: {:?}", other),
        }
    }

    #[test]
    fn unknown_ticker_is_no_data() {
        let port = MockDataPort::new();
        let batch = analyze_universe(&port, &request(&["NOPE"], sample_params()));
        assert!(batch.results.is_empty());
        assert_eq!(batch.skipped[0].reason, SkipReason::NoData);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let port = MockDataPort::new()
            .with_bars("FLAT1", flat_bars(30, 50.0))
            .with_bars("DOWN", descending_bars(30))
            .with_bars("UP", ascending_bars(30))
            .with_bars("FLAT2", flat_bars(30, 75.0))
            .with_bars("FLAT3", flat_bars(30, 10.0));

        let tickers = ["FLAT1", "DOWN", "UP", "FLAT2", "FLAT3"];
        for _ in 0..5 {
            let batch = analyze_universe(&port, &request(&tickers, sample_params()));
            let order: Vec<&str> = batch.results.iter().map(|r| r.ticker.as_str()).collect();
            assert_eq!(order, vec!["UP", "FLAT1", "FLAT2", "FLAT3", "DOWN"]);
        }
    }

    #[test]
    fn by_signal_partitions_results() {
        let port = MockDataPort::new()
            .with_bars("UP", ascending_bars(30))
            .with_bars("DOWN", descending_bars(30))
            .with_bars("FLAT", flat_bars(30, 1.0));

        let batch = analyze_universe(&port, &request(&["UP", "DOWN", "FLAT"], sample_params()));

        assert_eq!(batch.by_signal(Signal::Buy).count(), 1);
        assert_eq!(batch.by_signal(Signal::Sell).count(), 1);
        assert_eq!(batch.by_signal(Signal::Hold).count(), 1);
    }

    #[test]
    fn equal_ma_windows_share_one_series() {
        let params = ParameterSet {
            ma_short: 10,
            ma_long: 10,
            ..sample_params()
        };
        let set = compute_indicators("UP", &ascending_bars(30), &params).unwrap();
        let ctx = ScoringContext::from_indicators(&set);
        assert_eq!(ctx.latest.short_ma, ctx.latest.long_ma);

        let eval = score_indicators(&set);
        assert!(!eval.clauses.iter().any(|c| c.contains("MA above") || c.contains("MA below")));
    }
}

fn mirror(r: Readings) -> Readings {
    Readings {
        short_ma: r.long_ma,
        long_ma: r.short_ma,
        oscillator: r.oscillator.map(|v| 100.0 - v),
        macd_line: r.macd_signal,
        macd_signal: r.macd_line,
    }
}

fn opposite(signal: Signal) -> Signal {
    match signal {
        Signal::Buy => Signal::Sell,
        Signal::Sell => Signal::Buy,
        Signal::Hold => Signal::Hold,
    }
}

fn reading() -> impl Strategy<Value = Option<f64>> {
    prop::option::of((0i32..=100).prop_map(f64::from))
}

proptest! {
    #[test]
    fn constant_series_moving_average_is_constant(
        close in 0.01f64..10_000.0,
        count in 1usize..80,
        window in 1usize..30,
    ) {
        let series = calculate_sma(&flat_bars(count, close), window);
        prop_assert_eq!(series.len(), count);
        for point in series.values.iter().filter(|p| p.valid) {
            match point.value {
                IndicatorValue::Simple(v) => prop_assert!((v - close).abs() <= close * 1e-9),
                other => prop_assert!(false, "unexpected value {:?}", other),
            }
        }
    }

    #[test]
    fn moving_average_warmup(
        closes in prop::collection::vec(1.0f64..500.0, 0..80),
        window in 1usize..30,
    ) {
        let series = calculate_sma(&bars_from_closes(&closes), window);
        let expected = if closes.len() >= window { window - 1 } else { closes.len() };
        prop_assert_eq!(series.leading_invalid(), expected);
        prop_assert!(series.values[expected..].iter().all(|p| p.valid));
    }

    #[test]
    fn rising_series_oscillator_saturates(
        count in 1usize..80,
        window in 2usize..30,
        step in 0.01f64..5.0,
    ) {
        let closes: Vec<f64> = (0..count).map(|i| 10.0 + step * i as f64).collect();
        let series = calculate_rsi(&bars_from_closes(&closes), window);
        let expected = if count >= window { window - 1 } else { count };
        prop_assert_eq!(series.leading_invalid(), expected);
        for i in expected..count {
            prop_assert_eq!(series.simple_at(i), Some(100.0));
        }
    }

    #[test]
    fn equal_macd_spans_give_zero_line(
        closes in prop::collection::vec(1.0f64..500.0, 1..80),
        span in 1usize..30,
        signal in 1usize..15,
    ) {
        let series = calculate_macd(&bars_from_closes(&closes), span, span, signal);
        for i in 0..closes.len() {
            let (line, sig) = series.macd_at(i).unwrap();
            prop_assert_eq!(line, 0.0);
            prop_assert_eq!(sig, 0.0);
        }
    }

    #[test]
    fn mirrored_readings_negate_score(
        short_ma in reading(),
        long_ma in reading(),
        oscillator in reading(),
        macd_line in reading(),
        macd_signal in reading(),
    ) {
        let readings = Readings { short_ma, long_ma, oscillator, macd_line, macd_signal };
        let context = ScoringContext { latest: readings, prior: readings };
        let original = evaluate(&context, DEFAULT_RULES);
        let mirrored_readings = mirror(readings);
        let mirrored = evaluate(
            &ScoringContext { latest: mirrored_readings, prior: mirrored_readings },
            DEFAULT_RULES,
        );

        prop_assert_eq!(mirrored.score, -original.score);
        prop_assert_eq!(mirrored.signal, opposite(original.signal));
        prop_assert_eq!(mirrored.clauses.len(), original.clauses.len());
        if original.score == 0 {
            prop_assert_eq!(original.signal, Signal::Hold);
        }
    }
}
