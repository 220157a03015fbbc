use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse asset class of a traded symbol.
///
/// Never stored on a trade: it is re-derived from the symbol wherever it is
/// displayed or filtered on, so a rule change reclassifies history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    Gold,
    Oil,
    Crypto,
    Forex,
    Other,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 5] = [
        InstrumentKind::Gold,
        InstrumentKind::Oil,
        InstrumentKind::Crypto,
        InstrumentKind::Forex,
        InstrumentKind::Other,
    ];

    /// Classify a symbol. Total: every input maps to exactly one kind.
    ///
    /// Rules are evaluated in order, first match wins:
    /// 1. `XAU` -> Gold
    /// 2. `XTI`, `OIL`, `USOIL` -> Oil
    /// 3. `BTC`, `ETH`, `XRP`, `SOL` -> Crypto
    /// 4. six consecutive letters and ending in `USD` -> Forex
    /// 5. anything else -> Other
    pub fn classify(symbol: &str) -> Self {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return InstrumentKind::Other;
        }

        if symbol.contains("XAU") {
            InstrumentKind::Gold
        } else if contains_any(&symbol, &["XTI", "OIL", "USOIL"]) {
            InstrumentKind::Oil
        } else if contains_any(&symbol, &["BTC", "ETH", "XRP", "SOL"]) {
            InstrumentKind::Crypto
        } else if is_usd_pair(&symbol) {
            InstrumentKind::Forex
        } else {
            InstrumentKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstrumentKind::Gold => "Gold",
            InstrumentKind::Oil => "Oil",
            InstrumentKind::Crypto => "Crypto",
            InstrumentKind::Forex => "Forex",
            InstrumentKind::Other => "Other",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InstrumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gold" => Ok(InstrumentKind::Gold),
            "oil" => Ok(InstrumentKind::Oil),
            "crypto" => Ok(InstrumentKind::Crypto),
            "forex" => Ok(InstrumentKind::Forex),
            "other" => Ok(InstrumentKind::Other),
            _ => anyhow::bail!(
                "Invalid category: {}. Must be 'gold', 'oil', 'crypto', 'forex' or 'other'",
                s
            ),
        }
    }
}

/// Convenience alias matching [`InstrumentKind::classify`].
pub fn classify(symbol: &str) -> InstrumentKind {
    InstrumentKind::classify(symbol)
}

pub(crate) fn contains_any(symbol: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| symbol.contains(n))
}

/// Six consecutive ASCII uppercase letters somewhere in the symbol, and the
/// symbol ends in `USD`. Expects an already uppercased symbol.
pub(crate) fn is_usd_pair(symbol: &str) -> bool {
    has_letter_run(symbol, 6) && symbol.ends_with("USD")
}

fn has_letter_run(symbol: &str, len: usize) -> bool {
    let mut run = 0;
    for c in symbol.chars() {
        if c.is_ascii_uppercase() {
            run += 1;
            if run >= len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
