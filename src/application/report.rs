//! Report model shared by the PDF and CSV exporters.

use crate::domain::errors::JournalError;
use crate::domain::trading::types::Trade;
use rust_decimal::Decimal;

pub const DEFAULT_REPORT_TITLE: &str = "Backtesting Report";

pub const TABLE_HEADER: [&str; 8] = ["Date", "Time", "Symbol", "Side", "Entry", "Exit", "Lot", "P/L"];

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: [String; 8],
}

impl ReportRow {
    /// Unset fields print as `-`.
    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            cells: [
                or_dash(trade.date_label()),
                or_dash(trade.time_label()),
                trade.symbol.clone(),
                trade.side.to_string(),
                price_cell(trade.entry),
                price_cell(trade.exit),
                trade.lot.normalize().to_string(),
                pl_cell(trade.pl),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub total_trades: usize,
    pub net_pl: Decimal,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Build the report for a journal snapshot. Refuses an empty journal.
    pub fn build(title: impl Into<String>, trades: &[Trade]) -> Result<Self, JournalError> {
        if trades.is_empty() {
            return Err(JournalError::NothingToExport);
        }

        Ok(Self {
            title: title.into(),
            total_trades: trades.len(),
            net_pl: trades
                .iter()
                .fold(Decimal::ZERO, |net, t| net.saturating_add(t.pl_value())),
            rows: trades.iter().map(ReportRow::from_trade).collect(),
        })
    }

    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!("Total Trades: {}", self.total_trades),
            format!("Net P/L: {:.2}", self.net_pl),
        ]
    }
}

/// `+12.50` / `-3.10`
pub fn signed_pl(pl: Decimal) -> String {
    if pl >= Decimal::ZERO {
        format!("+{:.2}", pl)
    } else {
        format!("{:.2}", pl)
    }
}

/// Signed P/L, or `-` for a record without one.
pub fn pl_cell(pl: Option<Decimal>) -> String {
    pl.map(signed_pl).unwrap_or_else(|| "-".to_string())
}

/// Price without trailing zeros, or `-` when unset.
pub fn price_cell(price: Option<Decimal>) -> String {
    price
        .map(|p| p.normalize().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn or_dash(text: String) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text
    }
}
