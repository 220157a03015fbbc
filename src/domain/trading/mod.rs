// Trade records, instrument classification and P/L pricing
pub mod instrument;
pub mod pricing;
pub mod types;
