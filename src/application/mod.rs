// The trade journal store
pub mod journal;

// Screenshot acquisition and two-phase submission
pub mod attachment;
pub mod submission;

// Form state and report model consumed by the interfaces
pub mod report;
pub mod trade_form;
