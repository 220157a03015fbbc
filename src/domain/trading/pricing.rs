//! Profit/loss pricing per instrument family.
//!
//! The pricing rules detect instrument families on their own instead of
//! reusing [`InstrumentKind::classify`]. The two rule sets differ: `XRP` and
//! `SOL` are Crypto for display purposes but get no crypto pricing here.
//! Keep them separate; unifying them would change historical P/L previews.
//!
//! [`InstrumentKind::classify`]: crate::domain::trading::instrument::InstrumentKind::classify

use crate::domain::trading::instrument::{contains_any, is_usd_pair};
use crate::domain::trading::types::{Side, TradeDraft};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Price increment per pip for USD-quoted currency pairs.
pub const PIP_SIZE: Decimal = dec!(0.0001);
/// Value of one pip per standard lot.
pub const PIP_VALUE: Decimal = dec!(10);
/// Ounces per gold lot.
pub const GOLD_MULTIPLIER: Decimal = dec!(100);
/// Price tick for oil contracts.
pub const OIL_TICK: Decimal = dec!(0.01);

/// Formula used to turn a price move into money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingRule {
    /// `(exit - entry) * 100 * lot * contract`
    Gold,
    /// `(exit - entry) / 0.01 * lot * contract`
    Oil,
    /// `(exit - entry) * lot * contract`, BTC and ETH only
    Crypto,
    /// `(exit - entry) / 0.0001 * 10 * lot * contract`
    Forex,
    /// `(exit - entry) * lot * contract`
    Linear,
}

impl PricingRule {
    pub fn for_symbol(symbol: &str) -> Self {
        let symbol = symbol.trim().to_uppercase();

        if symbol.contains("XAU") {
            PricingRule::Gold
        } else if contains_any(&symbol, &["XTI", "OIL", "USOIL"]) {
            PricingRule::Oil
        } else if contains_any(&symbol, &["BTC", "ETH"]) {
            PricingRule::Crypto
        } else if is_usd_pair(&symbol) {
            PricingRule::Forex
        } else {
            PricingRule::Linear
        }
    }

    /// Unsigned (long-side) P/L for a price move. `None` on overflow.
    fn apply(&self, move_: Decimal, size: Decimal) -> Option<Decimal> {
        let points = match self {
            PricingRule::Gold => move_.checked_mul(GOLD_MULTIPLIER)?,
            PricingRule::Oil => move_.checked_div(OIL_TICK)?,
            PricingRule::Forex => move_.checked_div(PIP_SIZE)?.checked_mul(PIP_VALUE)?,
            PricingRule::Crypto | PricingRule::Linear => move_,
        };
        points.checked_mul(size)
    }
}

/// Signed P/L of a closed trade, rounded to 2 decimals.
///
/// Returns `None` when any price or size is not a finite number (or too
/// large to price), meaning the trade cannot be journaled.
pub fn compute_pl(
    symbol: &str,
    entry: f64,
    exit: f64,
    lot: f64,
    contract: f64,
    side: Side,
) -> Option<Decimal> {
    let entry = to_decimal(entry)?;
    let exit = to_decimal(exit)?;
    let lot = to_decimal(lot)?;
    let contract = to_decimal(contract)?;

    let move_ = exit.checked_sub(entry)?;
    let size = lot.checked_mul(contract)?;
    let pl = PricingRule::for_symbol(symbol).apply(move_, size)?;

    let signed = match side {
        Side::Long => pl,
        Side::Short => -pl,
    };
    let mut rounded = signed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // no "-0.00" for flat shorts
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    Some(rounded)
}

/// Converts through the shortest decimal representation of the float, so
/// `1.105` prices as `1.105` and not as its binary approximation.
pub(crate) fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Live P/L figures shown while a trade is being entered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlPreview {
    /// P/L the draft would record if saved now.
    pub pl: Option<Decimal>,
    /// P/L of exiting at the stop price instead ("SL risk").
    pub stop_risk: Option<Decimal>,
}

impl PlPreview {
    pub fn for_draft(draft: &TradeDraft, stop: Option<f64>) -> Self {
        let symbol = draft.normalized_symbol();
        let (Some(entry), Some(exit)) = (draft.entry, draft.exit) else {
            return Self::default();
        };
        if symbol.is_empty() {
            return Self::default();
        }

        let lot = draft.effective_lot();
        let contract = draft.effective_contract();
        let pl = compute_pl(&symbol, entry, exit, lot, contract, draft.side);
        let stop_risk = stop
            .filter(|s| s.is_finite())
            .and_then(|s| compute_pl(&symbol, entry, s, lot, contract, draft.side));

        Self { pl, stop_risk }
    }

    /// `+12.50 | SL Risk: -40.00`
    pub fn display(&self) -> String {
        let mut text = match self.pl {
            Some(pl) if pl >= Decimal::ZERO => format!("+{:.2}", pl),
            Some(pl) => format!("{:.2}", pl),
            None => String::new(),
        };
        if let Some(risk) = self.stop_risk {
            text.push_str(&format!(" | SL Risk: {:.2}", risk));
        }
        text
    }
}
