// Derived views over the journal: statistics, chart series, table queries
pub mod metrics;
pub mod query;
pub mod series;
