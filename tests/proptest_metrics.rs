//! Property-Based Tests — Journal Metrics Invariants
//!
//! Uses `proptest` to check that aggregation holds its arithmetic
//! relationships across random collections.

use proptest::prelude::*;
use serde_json::{Value, json};

use trade_journal::domain::metrics::TradeMetrics;
use trade_journal::domain::trade::Trade;

fn arb_status() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!("win")),
        Just(json!("loss")),
        Just(json!("breakeven")),
        Just(Value::Null),
    ]
}

fn arb_trade() -> impl Strategy<Value = Trade> {
    (arb_status(), proptest::option::of(-1000i64..1000)).prop_map(|(status, result)| {
        let mut value = json!({ "status": status });
        if let Some(result) = result {
            value["result"] = json!(result);
        }
        Trade::from_value(value)
    })
}

proptest! {
    /// Win and loss counts always partition the collection.
    #[test]
    fn counts_partition_total(trades in prop::collection::vec(arb_trade(), 0..64)) {
        let m = TradeMetrics::from_trades(&trades);
        prop_assert_eq!(m.total_trades, trades.len());
        prop_assert_eq!(m.win_trades + m.loss_trades, m.total_trades);
    }

    /// Win rate is a percentage with one decimal place.
    #[test]
    fn win_rate_bounded_and_rounded(trades in prop::collection::vec(arb_trade(), 0..64)) {
        let m = TradeMetrics::from_trades(&trades);
        prop_assert!((0.0..=100.0).contains(&m.win_rate), "win rate {}", m.win_rate);
        let tenths = m.win_rate * 10.0;
        prop_assert!((tenths - tenths.round()).abs() < 1e-9, "not one decimal: {}", m.win_rate);
    }

    /// Total P&L is the plain sum of results, missing ones as zero.
    #[test]
    fn total_pl_is_sum_of_results(trades in prop::collection::vec(arb_trade(), 0..64)) {
        let m = TradeMetrics::from_trades(&trades);
        let expected: f64 = trades.iter().map(Trade::result).sum();
        prop_assert!((m.total_pl - expected).abs() < 1e-6);
    }

    /// Averages are finite even for degenerate collections.
    #[test]
    fn averages_always_finite(trades in prop::collection::vec(arb_trade(), 0..64)) {
        let m = TradeMetrics::from_trades(&trades);
        prop_assert!(m.avg_win.is_finite());
        prop_assert!(m.avg_loss.is_finite());
    }
}
