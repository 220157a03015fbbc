use crate::domain::trading::instrument::InstrumentKind;
use crate::domain::trading::types::Trade;

/// Category selection of the journal view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(InstrumentKind),
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(kind) => kind.label(),
        }
    }

    pub fn options() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(InstrumentKind::ALL.map(CategoryFilter::Only))
    }
}

/// Filter + free-text search applied to the journal table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeQuery {
    pub category: CategoryFilter,
    pub search: String,
}

impl TradeQuery {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let CategoryFilter::Only(kind) = self.category {
            if trade.category() != kind {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        trade.symbol.to_lowercase().contains(&needle) || trade.notes.to_lowercase().contains(&needle)
    }

    pub fn apply<'a>(&self, trades: &'a [Trade]) -> Vec<&'a Trade> {
        trades.iter().filter(|t| self.matches(t)).collect()
    }
}
