//! Chart series derived from the journal.

use crate::domain::trading::types::Trade;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: Option<NaiveDate>,
    pub equity: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinLoss {
    pub wins: usize,
    pub losses: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPl {
    /// `YYYY-MM`
    pub month: String,
    pub pl: Decimal,
}

/// Running sum of P/L in journal order, keyed by each trade's date.
/// Saturates at the `Decimal` bounds.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut equity = Decimal::ZERO;
    trades
        .iter()
        .map(|t| {
            equity = equity.saturating_add(t.pl_value());
            EquityPoint {
                date: t.date,
                equity,
            }
        })
        .collect()
}

pub fn win_loss(trades: &[Trade]) -> WinLoss {
    WinLoss {
        wins: trades.iter().filter(|t| t.is_win()).count(),
        losses: trades.iter().filter(|t| t.is_loss()).count(),
    }
}

/// P/L summed per calendar month, months ascending, undated trades last.
pub fn monthly_pl(trades: &[Trade]) -> Vec<MonthlyPl> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for trade in trades {
        let bucket = buckets.entry(trade.month_key()).or_insert(Decimal::ZERO);
        *bucket = bucket.saturating_add(trade.pl_value());
    }
    buckets
        .into_iter()
        .map(|(month, pl)| MonthlyPl { month, pl })
        .collect()
}

/// The newest `limit` trades (the journal is stored newest first).
pub fn recent(trades: &[Trade], limit: usize) -> &[Trade] {
    &trades[..trades.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trading::types::Side;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn trade(date: (i32, u32, u32), pl: Decimal) -> Trade {
        Trade {
            id: format!("{}-{}-{}", date.0, date.1, date.2),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            time: NaiveTime::from_hms_opt(12, 0, 0),
            symbol: "XAUUSD".to_string(),
            side: Side::Long,
            entry: Some(dec!(2000)),
            exit: Some(dec!(2000)),
            lot: Decimal::ONE,
            contract: Decimal::ONE,
            notes: String::new(),
            screenshot: None,
            pl: Some(pl),
        }
    }

    #[test]
    fn test_equity_curve_follows_list_order() {
        let trades = vec![
            trade((2024, 2, 10), dec!(50)),
            trade((2024, 2, 1), dec!(-20)),
            trade((2024, 1, 15), dec!(100)),
        ];
        let curve = equity_curve(&trades);
        let values: Vec<_> = curve.iter().map(|p| p.equity).collect();
        assert_eq!(values, vec![dec!(50), dec!(30), dec!(130)]);
        assert_eq!(curve[2].date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_monthly_buckets_sorted_ascending() {
        let trades = vec![
            trade((2024, 3, 2), dec!(10)),
            trade((2023, 12, 30), dec!(-5)),
            trade((2024, 3, 20), dec!(15.5)),
            trade((2024, 1, 4), dec!(7)),
        ];
        let months = monthly_pl(&trades);
        let keys: Vec<_> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(months[2].pl, dec!(25.5));
    }

    #[test]
    fn test_undated_and_unpriced_records() {
        let mut undated = trade((2024, 1, 1), dec!(4));
        undated.date = None;
        let mut unpriced = trade((2024, 1, 9), dec!(0));
        unpriced.pl = None;
        let trades = vec![undated, unpriced, trade((2024, 1, 20), dec!(6))];

        let months = monthly_pl(&trades);
        assert_eq!(months.len(), 2);
        assert_eq!((months[0].month.as_str(), months[0].pl), ("2024-01", dec!(6)));
        assert_eq!((months[1].month.as_str(), months[1].pl), ("unknown", dec!(4)));

        let curve = equity_curve(&trades);
        assert_eq!(curve[1].equity, dec!(4));
        assert_eq!(curve[0].date, None);
    }

    #[test]
    fn test_running_totals_saturate() {
        let huge = Decimal::from_scientific("5e28").unwrap();
        let trades = vec![trade((2024, 5, 1), huge), trade((2024, 5, 2), huge)];
        assert_eq!(equity_curve(&trades)[1].equity, Decimal::MAX);
        assert_eq!(monthly_pl(&trades)[0].pl, Decimal::MAX);
    }

    #[test]
    fn test_win_loss_counts_ignore_breakeven() {
        let trades = vec![
            trade((2024, 1, 1), dec!(1)),
            trade((2024, 1, 2), dec!(0)),
            trade((2024, 1, 3), dec!(-1)),
            trade((2024, 1, 4), dec!(-2)),
        ];
        assert_eq!(win_loss(&trades), WinLoss { wins: 1, losses: 2 });
    }

    #[test]
    fn test_recent_is_bounded() {
        let trades = vec![trade((2024, 1, 1), dec!(1)), trade((2024, 1, 2), dec!(2))];
        assert_eq!(recent(&trades, 6).len(), 2);
        assert_eq!(recent(&trades, 1)[0].pl, Some(dec!(1)));
        assert!(recent(&[], 6).is_empty());
    }
}
