use crate::domain::trading::instrument::InstrumentKind;
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

impl FromStr for Side {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Side::Long),
            "short" | "sell" => Ok(Side::Short),
            _ => anyhow::bail!("Invalid side: {}. Must be 'long' or 'short'", s),
        }
    }
}

/// A journaled, closed trade.
///
/// `pl` is captured once when the trade enters the journal and is never
/// recomputed, even if the pricing rules change later.
///
/// Records read back from storage only need an id and a symbol. Any other
/// field that is missing or malformed reads as unset and is written back
/// as such, so older or hand-edited journals survive a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    #[serde(rename = "_id", default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, with = "ymd")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub symbol: String,
    #[serde(default, deserialize_with = "lenient::side")]
    pub side: Side,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub entry: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub exit: Option<Decimal>,
    #[serde(default = "unit_size", deserialize_with = "lenient::size")]
    pub lot: Decimal,
    #[serde(default = "unit_size", deserialize_with = "lenient::size")]
    pub contract: Decimal,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
    #[serde(default, with = "screenshot_field")]
    pub screenshot: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub pl: Option<Decimal>,
}

impl Trade {
    /// A record is only usable when it carries both an identity and a symbol.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && !self.symbol.trim().is_empty()
    }

    pub fn category(&self) -> InstrumentKind {
        InstrumentKind::classify(&self.symbol)
    }

    /// P/L as it enters totals; a record without one counts as flat.
    pub fn pl_value(&self) -> Decimal {
        self.pl.unwrap_or(Decimal::ZERO)
    }

    /// `YYYY-MM` bucket used for monthly aggregation, `unknown` when undated.
    pub fn month_key(&self) -> String {
        match self.date {
            Some(date) => date.format("%Y-%m").to_string(),
            None => "unknown".to_string(),
        }
    }

    /// `YYYY-MM-DD`, empty when unset.
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// `HH:MM`, empty when unset.
    pub fn time_label(&self) -> String {
        self.time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }

    pub fn is_win(&self) -> bool {
        self.pl_value() > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.pl_value() < Decimal::ZERO
    }
}

fn unit_size() -> Decimal {
    Decimal::ONE
}

/// User input for a new trade, before validation and pricing.
///
/// Numeric fields are `None` when the user left them blank or typed
/// something unparseable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeDraft {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub symbol: String,
    pub side: Side,
    pub entry: Option<f64>,
    pub exit: Option<f64>,
    pub lot: Option<f64>,
    pub contract: Option<f64>,
    pub notes: String,
    pub screenshot: Option<String>,
}

impl TradeDraft {
    pub fn new(symbol: impl Into<String>, side: Side, entry: f64, exit: f64) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            entry: Some(entry),
            exit: Some(exit),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, lot: f64, contract: f64) -> Self {
        self.lot = Some(lot);
        self.contract = Some(contract);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_timestamp(mut self, date: NaiveDate, time: NaiveTime) -> Self {
        self.date = Some(date);
        self.time = Some(time);
        self
    }

    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }

    /// Lot size, falling back to 1 when blank, non-finite or not positive.
    pub fn effective_lot(&self) -> f64 {
        positive_or_one(self.lot)
    }

    /// Contract size, falling back to 1 when blank, non-finite or not positive.
    pub fn effective_contract(&self) -> f64 {
        positive_or_one(self.contract)
    }
}

fn positive_or_one(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 1.0,
    }
}

/// Field readers for stored records. A value of the wrong shape reads as
/// unset instead of rejecting the whole record.
mod lenient {
    use super::Side;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match value(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    /// Strings and JSON numbers, including exponent notation.
    pub fn decimal<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        let raw = match value(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => return Ok(None),
        };
        let raw = raw.trim();
        Ok(Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok())
    }

    /// Lot and contract sizes fall back to 1 like they do on entry.
    pub fn size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        Ok(decimal(deserializer)?
            .filter(|v| *v > Decimal::ZERO)
            .unwrap_or(Decimal::ONE))
    }

    pub fn side<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Side, D::Error> {
        Ok(text(deserializer)?.parse().unwrap_or_default())
    }
}

/// `YYYY-MM-DD` wire format; an unset date is stored as `""`.
mod ymd {
    use chrono::NaiveDate;
    use serde::{Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = super::lenient::text(deserializer)?;
        Ok(NaiveDate::parse_from_str(raw.trim(), FORMAT).ok())
    }
}

/// `HH:MM` wire format for trade times; an unset time is stored as `""`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw = super::lenient::text(deserializer)?;
        let raw = raw.trim();
        Ok(NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok())
    }
}

/// Screenshots are stored as an empty string when absent.
mod screenshot_field {
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        screenshot: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(screenshot.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = super::lenient::text(deserializer)?;
        Ok(Some(raw).filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_trade() -> Trade {
        Trade {
            id: "abc1234".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            symbol: "XAUUSD".to_string(),
            side: Side::Long,
            entry: Some(dec!(1900)),
            exit: Some(dec!(1910)),
            lot: dec!(1),
            contract: dec!(1),
            notes: "breakout".to_string(),
            screenshot: None,
            pl: Some(dec!(1000.00)),
        }
    }

    #[test]
    fn test_trade_wire_format() {
        let json = serde_json::to_value(sample_trade()).unwrap();
        assert_eq!(json["_id"], "abc1234");
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["time"], "09:30");
        assert_eq!(json["side"], "long");
        assert_eq!(json["screenshot"], "");
    }

    #[test]
    fn test_trade_accepts_numeric_legacy_fields() {
        let raw = r#"{
            "_id": "k3j2l1x",
            "date": "2024-01-15",
            "time": "14:05",
            "symbol": "EURUSD",
            "side": "short",
            "entry": 1.1050,
            "exit": 1.1000,
            "notes": "",
            "screenshot": "",
            "pl": 500
        }"#;
        let trade: Trade = serde_json::from_str(raw).unwrap();
        assert_eq!(trade.side, Side::Short);
        assert_eq!(trade.lot, Decimal::ONE);
        assert_eq!(trade.contract, Decimal::ONE);
        assert_eq!(trade.pl, Some(dec!(500)));
        assert_eq!(trade.entry, Some(dec!(1.105)));
        assert!(trade.screenshot.is_none());
        assert!(trade.is_valid());
    }

    #[test]
    fn test_record_with_gaps_is_kept_and_written_back() {
        let raw = r#"{"_id":"a1","symbol":"XAUUSD","date":"","side":"sideways","entry":"n/a","lot":0,"pl":null}"#;
        let trade: Trade = serde_json::from_str(raw).unwrap();
        assert!(trade.is_valid());
        assert_eq!(trade.date, None);
        assert_eq!(trade.time, None);
        assert_eq!(trade.side, Side::Long);
        assert_eq!(trade.entry, None);
        assert_eq!(trade.lot, Decimal::ONE);
        assert_eq!(trade.pl, None);
        assert_eq!(trade.pl_value(), Decimal::ZERO);
        assert!(!trade.is_win() && !trade.is_loss());
        assert_eq!(trade.month_key(), "unknown");
        assert_eq!(trade.date_label(), "");

        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["date"], "");
        assert_eq!(json["time"], "");
        assert!(json["pl"].is_null());
        assert!(json["entry"].is_null());
    }

    #[test]
    fn test_exponent_numbers_are_read() {
        let raw = r#"{"_id":"a2","symbol":"AAPL","time":"09:15","pl":5e3}"#;
        let trade: Trade = serde_json::from_str(raw).unwrap();
        assert_eq!(trade.pl, Some(dec!(5000)));
        assert_eq!(trade.time_label(), "09:15");
    }

    #[test]
    fn test_trade_validity_requires_id_and_symbol() {
        let mut trade = sample_trade();
        trade.id.clear();
        assert!(!trade.is_valid());

        let mut trade = sample_trade();
        trade.symbol = "  ".to_string();
        assert!(!trade.is_valid());
    }

    #[test]
    fn test_month_key_and_outcome() {
        let trade = sample_trade();
        assert_eq!(trade.month_key(), "2024-03");
        assert!(trade.is_win());
        assert!(!trade.is_loss());
    }

    #[test]
    fn test_draft_size_defaults() {
        let draft = TradeDraft::new("eurusd", Side::Long, 1.1, 1.2);
        assert_eq!(draft.effective_lot(), 1.0);
        assert_eq!(draft.effective_contract(), 1.0);
        assert_eq!(draft.normalized_symbol(), "EURUSD");

        let draft = draft.with_size(0.0, f64::NAN);
        assert_eq!(draft.effective_lot(), 1.0);
        assert_eq!(draft.effective_contract(), 1.0);

        let draft = TradeDraft::new("EURUSD", Side::Long, 1.1, 1.2).with_size(0.5, 2.0);
        assert_eq!(draft.effective_lot(), 0.5);
        assert_eq!(draft.effective_contract(), 2.0);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!("Short".parse::<Side>().unwrap(), Side::Short);
        assert_eq!("long".parse::<Side>().unwrap(), Side::Long);
        assert!("flat".parse::<Side>().is_err());
    }
}
