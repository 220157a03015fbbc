pub mod components;
pub mod dashboard;
pub mod design_system;
pub mod journal_view;
pub mod reports_view;
pub mod trade_form_view;
pub mod ui;

pub use ui::JournalApp;
