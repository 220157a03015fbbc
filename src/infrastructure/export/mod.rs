// Report renderers
pub mod csv_report;
pub mod pdf_report;

pub use csv_report::{export_csv, write_csv};
pub use pdf_report::{PageLayout, export_pdf, render_pdf};
