use crate::domain::trading::types::Trade;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Aggregate statistics over the journal
///
/// Recomputed from the full trade list on every refresh; nothing here is
/// updated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalMetrics {
    pub total_trades: usize,
    pub net_pl: Decimal,

    // Trade Statistics (break-even trades are neither wins nor losses)
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: Option<f64>,

    // Profit Metrics
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    pub profit_factor: Option<f64>,
    pub average_win: Decimal,
    pub average_loss: Decimal,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
}

impl JournalMetrics {
    pub fn calculate(trades: &[Trade]) -> Self {
        let total_trades = trades.len();
        if total_trades == 0 {
            return Self::default();
        }

        let mut metrics = Self {
            total_trades,
            ..Default::default()
        };

        // Totals saturate: a stored journal may hold more than a Decimal can sum.
        for trade in trades {
            let pl = trade.pl_value();
            metrics.net_pl = metrics.net_pl.saturating_add(pl);
            if trade.is_win() {
                metrics.winning_trades += 1;
                metrics.gross_profit = metrics.gross_profit.saturating_add(pl);
                metrics.largest_win = metrics.largest_win.max(pl);
            } else if trade.is_loss() {
                metrics.losing_trades += 1;
                metrics.gross_loss = metrics.gross_loss.saturating_add(pl.abs());
                metrics.largest_loss = metrics.largest_loss.min(pl);
            }
        }

        metrics.win_rate = Some(metrics.winning_trades as f64 / total_trades as f64 * 100.0);

        if metrics.winning_trades > 0 {
            metrics.average_win = metrics.gross_profit / Decimal::from(metrics.winning_trades);
        }
        if metrics.losing_trades > 0 {
            metrics.average_loss = -(metrics.gross_loss / Decimal::from(metrics.losing_trades));
        }

        metrics.profit_factor = if metrics.gross_loss > Decimal::ZERO {
            metrics
                .gross_profit
                .checked_div(metrics.gross_loss)
                .and_then(|pf| pf.to_f64())
        } else {
            None
        };

        metrics
    }

    /// Win rate as shown on the dashboard: `"66.7%"`, or `"—"` with no trades.
    pub fn win_rate_display(&self) -> String {
        match self.win_rate {
            Some(rate) => format!("{:.1}%", rate),
            None => "—".to_string(),
        }
    }

    /// `$-12.50` style net figure.
    pub fn net_display(&self) -> String {
        format!("${:.2}", self.net_pl)
    }

    /// Ticker line: net P/L, wins, losses, win rate (0 when empty), total.
    pub fn ticker(&self) -> String {
        format!(
            "Net P/L: ${:.2}   Wins: {}   Losses: {}   WinRate: {:.1}%   Trades: {}",
            self.net_pl,
            self.winning_trades,
            self.losing_trades,
            self.win_rate.unwrap_or(0.0),
            self.total_trades
        )
    }
}

/// Whether gross profit and gross loss of `trades` both fit in a `Decimal`.
///
/// Every running total derived from a journal (net, equity, monthly) lies
/// between these two, so a journal passing this check sums exactly.
pub fn totals_fit(trades: &[Trade]) -> bool {
    let mut profit = Decimal::ZERO;
    let mut loss = Decimal::ZERO;
    for pl in trades.iter().map(Trade::pl_value) {
        let total = if pl > Decimal::ZERO { &mut profit } else { &mut loss };
        match total.checked_add(pl.abs()) {
            Some(sum) => *total = sum,
            None => return false,
        }
    }
    true
}
