//! Trade Journal
//!
//! Owns the ordered list of journaled trades (newest first) and mirrors it
//! to a [`KeyValueStore`] under a single key. Every mutation rewrites the
//! whole list; there are no partial writes.

use crate::domain::errors::JournalError;
use crate::domain::performance::metrics::totals_fit;
use crate::domain::repositories::KeyValueStore;
use crate::domain::trading::pricing::{compute_pl, to_decimal};
use crate::domain::trading::types::{Trade, TradeDraft};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Default storage key, shared with journals written by the browser edition.
pub const DEFAULT_STORAGE_KEY: &str = "tj_ftmo_v1";

pub struct TradeJournal {
    store: Arc<dyn KeyValueStore>,
    key: String,
    trades: Vec<Trade>,
}

impl TradeJournal {
    /// Load the journal from storage.
    ///
    /// Records without an id or symbol are left out of the working set; any
    /// other gaps are kept as unset fields. The stored payload itself is not touched until the next
    /// mutation rewrites it.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let payload = store
            .get(&key)
            .with_context(|| format!("Failed to read journal key {}", key))?;

        let trades = match payload {
            Some(raw) => decode_trades(&raw),
            None => Vec::new(),
        };

        info!("Loaded {} trades from journal key {}", trades.len(), key);
        Ok(Self { store, key, trades })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Current trades, newest first, re-validated on every read.
    pub fn snapshot(&self) -> Vec<Trade> {
        self.trades.iter().filter(|t| t.is_valid()).cloned().collect()
    }

    pub fn find(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Validate, price and journal a draft, stamped with the local clock.
    pub fn insert(&mut self, draft: TradeDraft) -> Result<Trade, JournalError> {
        self.insert_at(draft, Local::now().naive_local())
    }

    /// Validate, price and journal a draft. `now` fills a missing date/time.
    ///
    /// On any validation error nothing is written and the journal is
    /// unchanged. The new trade becomes the first element. A trade that
    /// would push the journal totals past what a `Decimal` holds is
    /// rejected as unpriceable.
    pub fn insert_at(
        &mut self,
        draft: TradeDraft,
        now: NaiveDateTime,
    ) -> Result<Trade, JournalError> {
        let mut trade = build_trade(draft, now)?;
        trade.id = self.fresh_id();

        let mut candidate = Vec::with_capacity(self.trades.len() + 1);
        candidate.push(trade.clone());
        candidate.extend(self.trades.iter().cloned());

        if !totals_fit(&candidate) {
            warn!("Journal totals would overflow with {} trade", trade.symbol);
            return Err(JournalError::Unpriceable {
                symbol: trade.symbol,
            });
        }

        self.commit(candidate)?;
        info!(
            "Journaled {} {} (P/L {:.2})",
            trade.side,
            trade.symbol,
            trade.pl_value()
        );
        Ok(trade)
    }

    /// Delete the trade with `id`. Unknown ids leave the trades unchanged;
    /// the list is rewritten either way.
    pub fn remove(&mut self, id: &str) -> Result<Option<Trade>, JournalError> {
        let removed = self.find(id).cloned();
        let candidate: Vec<Trade> = self.trades.iter().filter(|t| t.id != id).cloned().collect();

        self.commit(candidate)?;
        match &removed {
            Some(trade) => info!("Removed trade {} ({})", trade.id, trade.symbol),
            None => info!("Remove requested for unknown trade {}", id),
        }
        Ok(removed)
    }

    /// Delete only after `confirm` approves the trade. A declined
    /// confirmation is a no-op and performs no write.
    pub fn remove_confirmed(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&Trade) -> bool,
    ) -> Result<Option<Trade>, JournalError> {
        match self.find(id) {
            Some(trade) if confirm(trade) => self.remove(id),
            Some(_) => Ok(None),
            None => self.remove(id),
        }
    }

    /// Persist first, then swap the working copy, so a failed write never
    /// leaves memory ahead of storage.
    fn commit(&mut self, candidate: Vec<Trade>) -> Result<(), JournalError> {
        let payload = serde_json::to_string(&candidate).map_err(|e| JournalError::Storage {
            reason: e.to_string(),
        })?;
        self.store
            .set(&self.key, &payload)
            .map_err(|e| JournalError::Storage {
                reason: format!("{:#}", e),
            })?;
        self.trades = candidate;
        Ok(())
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find(&id).is_none() {
                return id;
            }
        }
    }
}

/// Turn a draft into a priced trade without an id.
fn build_trade(draft: TradeDraft, now: NaiveDateTime) -> Result<Trade, JournalError> {
    let symbol = draft.normalized_symbol();
    if symbol.is_empty() {
        return Err(JournalError::MissingField { field: "Symbol" });
    }
    let entry = finite(draft.entry).ok_or(JournalError::MissingField { field: "Entry" })?;
    let exit = finite(draft.exit).ok_or(JournalError::MissingField { field: "Exit" })?;
    let lot = draft.effective_lot();
    let contract = draft.effective_contract();

    let unpriceable = || JournalError::Unpriceable {
        symbol: symbol.clone(),
    };
    let pl = compute_pl(&symbol, entry, exit, lot, contract, draft.side).ok_or_else(unpriceable)?;

    let time = draft.time.unwrap_or_else(|| {
        NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now.time())
    });

    Ok(Trade {
        id: String::new(),
        date: Some(draft.date.unwrap_or(now.date())),
        time: Some(time),
        side: draft.side,
        entry: Some(to_decimal(entry).ok_or_else(unpriceable)?),
        exit: Some(to_decimal(exit).ok_or_else(unpriceable)?),
        lot: to_decimal(lot).ok_or_else(unpriceable)?,
        contract: to_decimal(contract).ok_or_else(unpriceable)?,
        notes: draft.notes,
        screenshot: draft.screenshot.filter(|s| !s.is_empty()),
        pl: Some(pl),
        symbol,
    })
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Decode a stored payload, keeping every record with an id and a symbol.
pub fn decode_trades(raw: &str) -> Vec<Trade> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(serde_json::Value::Array(records)) => records,
        Ok(_) => {
            warn!("Journal payload is not a list, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!("Journal payload is unreadable ({}), starting empty", e);
            return Vec::new();
        }
    };

    let total = records.len();
    let trades: Vec<Trade> = records
        .into_iter()
        .filter_map(|record| serde_json::from_value::<Trade>(record).ok())
        .filter(|t| t.is_valid())
        .collect();

    if trades.len() < total {
        warn!("Dropped {} journal records without id or symbol", total - trades.len());
    }
    let gaps = trades
        .iter()
        .filter(|t| t.date.is_none() || t.time.is_none() || t.pl.is_none())
        .count();
    if gaps > 0 {
        warn!("{} journal records have no date, time or P/L", gaps);
    }
    trades
}
