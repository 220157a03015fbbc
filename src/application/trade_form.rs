//! Editable state behind the "New Trade" form.

use crate::domain::trading::instrument::InstrumentKind;
use crate::domain::trading::pricing::PlPreview;
use crate::domain::trading::types::{Side, TradeDraft};
use chrono::{NaiveDate, NaiveTime};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeForm {
    pub date: String,
    pub time: String,
    pub symbol: String,
    pub side: Side,
    pub entry: String,
    pub exit: String,
    pub lot: String,
    pub contract: String,
    pub stop_loss: String,
    pub notes: String,
    pub screenshot_path: String,
}

impl TradeForm {
    /// Category shown next to the symbol while typing.
    pub fn category_hint(&self) -> Option<InstrumentKind> {
        if self.symbol.trim().is_empty() {
            None
        } else {
            Some(InstrumentKind::classify(&self.symbol))
        }
    }

    pub fn to_draft(&self) -> TradeDraft {
        TradeDraft {
            date: NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok(),
            time: NaiveTime::parse_from_str(self.time.trim(), "%H:%M").ok(),
            symbol: self.symbol.trim().to_uppercase(),
            side: self.side,
            entry: parse_number(&self.entry),
            exit: parse_number(&self.exit),
            lot: parse_number(&self.lot),
            contract: parse_number(&self.contract),
            notes: self.notes.clone(),
            screenshot: None,
        }
    }

    pub fn preview(&self) -> PlPreview {
        PlPreview::for_draft(&self.to_draft(), parse_number(&self.stop_loss))
    }

    pub fn screenshot_path(&self) -> Option<PathBuf> {
        let path = self.screenshot_path.trim();
        if path.is_empty() {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse a numeric form field; blank or malformed input is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
