//! Journal Metrics - Summary Statistics over the Trade Collection
//!
//! Win/loss counts, win rate, total and average P&L. Pure functions over
//! an already-loaded collection; no I/O.
//!
//! Two notions of "loss" coexist here on purpose: `loss_trades` counts
//! every record that is not a win (unknown statuses included), while
//! `avg_loss` only sums records whose status is literally `"loss"` and then
//! divides by that wider count.

use serde::Serialize;

use super::trade::{Trade, TradeStatus};

/// Aggregated journal statistics, serialized in the camelCase shape the
/// browser client reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    /// Number of records.
    pub total_trades: usize,
    /// Records with status `"win"`.
    pub win_trades: usize,
    /// `total_trades - win_trades`.
    pub loss_trades: usize,
    /// Percentage of wins, one decimal place.
    pub win_rate: f64,
    /// Sum of `result` across all records.
    pub total_pl: f64,
    /// Mean `result` of winning records.
    pub avg_win: f64,
    /// Sum of `result` over `"loss"` records divided by `loss_trades`.
    pub avg_loss: f64,
}

impl TradeMetrics {
    /// Compute metrics for a collection. Empty input yields all zeros.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let total_trades = trades.len();

        let mut win_trades = 0usize;
        let mut total_pl = 0.0;
        let mut win_sum = 0.0;
        let mut loss_sum = 0.0;

        for trade in trades {
            let result = trade.result();
            total_pl += result;
            match trade.status() {
                TradeStatus::Win => {
                    win_trades += 1;
                    win_sum += result;
                }
                TradeStatus::Loss => loss_sum += result,
                TradeStatus::Other => {}
            }
        }

        let loss_trades = total_trades - win_trades;

        let win_rate = if total_trades > 0 {
            round_one_decimal(win_trades as f64 / total_trades as f64 * 100.0)
        } else {
            0.0
        };
        let avg_win = if win_trades > 0 {
            win_sum / win_trades as f64
        } else {
            0.0
        };
        let avg_loss = if loss_trades > 0 {
            loss_sum / loss_trades as f64
        } else {
            0.0
        };

        Self {
            total_trades,
            win_trades,
            loss_trades,
            win_rate,
            total_pl,
            avg_win,
            avg_loss,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn trades(values: Value) -> Vec<Trade> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_mixed_statuses() {
        let m = TradeMetrics::from_trades(&trades(json!([
            {"status": "win", "result": 100},
            {"status": "win", "result": 50},
            {"status": "loss", "result": -30},
            {"status": "other"}
        ])));

        assert_eq!(m.total_trades, 4);
        assert_eq!(m.win_trades, 2);
        assert_eq!(m.loss_trades, 2);
        assert_eq!(m.win_rate, 50.0);
        assert_eq!(m.total_pl, 120.0);
        assert_eq!(m.avg_win, 75.0);
        // -30 over the subtraction-derived loss count of 2
        assert_eq!(m.avg_loss, -15.0);
    }

    #[test]
    fn test_empty_collection_is_all_zero() {
        assert_eq!(TradeMetrics::from_trades(&[]), TradeMetrics::default());
    }

    #[test]
    fn test_win_rate_rounds_to_one_decimal() {
        let m = TradeMetrics::from_trades(&trades(json!([
            {"status": "win", "result": 1},
            {"status": "loss", "result": -1},
            {"status": "loss", "result": -1}
        ])));
        assert_eq!(m.win_rate, 33.3);

        let m = TradeMetrics::from_trades(&trades(json!([
            {"status": "win"}, {"status": "win"}, {"status": "loss"}
        ])));
        assert_eq!(m.win_rate, 66.7);
    }

    #[test]
    fn test_only_wins_has_no_loss_average() {
        let m = TradeMetrics::from_trades(&trades(json!([
            {"status": "win", "result": 10},
            {"status": "win", "result": 30}
        ])));
        assert_eq!(m.loss_trades, 0);
        assert_eq!(m.avg_loss, 0.0);
        assert_eq!(m.win_rate, 100.0);
        assert_eq!(m.avg_win, 20.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let m = TradeMetrics::from_trades(&trades(json!([{"status": "win", "result": 5}])));
        let value = serde_json::to_value(m).unwrap();
        assert_eq!(value["totalTrades"], json!(1));
        assert_eq!(value["winRate"], json!(100.0));
        assert_eq!(value["totalPl"], json!(5.0));
        assert!(value.get("avgLoss").is_some());
    }
}
