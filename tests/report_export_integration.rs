use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tradejournal::application::journal::{DEFAULT_STORAGE_KEY, TradeJournal};
use tradejournal::application::report::{DEFAULT_REPORT_TITLE, Report};
use tradejournal::domain::errors::JournalError;
use tradejournal::domain::trading::types::{Side, TradeDraft};
use tradejournal::infrastructure::InMemoryKeyValueStore;
use tradejournal::infrastructure::export::{PageLayout, export_csv, export_pdf, render_pdf};
use uuid::Uuid;

fn journal_with(n: usize) -> TradeJournal {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mut journal = TradeJournal::load(store, DEFAULT_STORAGE_KEY).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    for i in 0..n {
        let exit = if i % 3 == 0 { 1899.0 } else { 1902.5 };
        let draft = TradeDraft::new("XAUUSD", Side::Long, 1900.0, exit)
            .with_size(0.1, 1.0)
            .with_timestamp(day, NaiveTime::from_hms_opt(9, (i % 60) as u32, 0).unwrap());
        journal.insert(draft).unwrap();
    }
    journal
}

#[test]
fn test_pdf_export_writes_document() {
    let journal = journal_with(55);
    let report = Report::build(DEFAULT_REPORT_TITLE, &journal.snapshot()).unwrap();
    assert_eq!(report.rows.len(), 55);

    let path = std::env::temp_dir().join(format!("report-{}.pdf", Uuid::new_v4()));
    export_pdf(&report, PageLayout::new(40), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_pdf_renders_in_memory() {
    let journal = journal_with(3);
    let report = Report::build("Weekly Review", &journal.snapshot()).unwrap();
    let bytes = render_pdf(&report, PageLayout::new(40)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_empty_journal_has_nothing_to_export() {
    let journal = journal_with(0);
    let trades = journal.snapshot();

    let err = Report::build(DEFAULT_REPORT_TITLE, &trades).unwrap_err();
    assert!(matches!(err, JournalError::NothingToExport));

    let path = std::env::temp_dir().join(format!("report-{}.csv", Uuid::new_v4()));
    let err = export_csv(&trades, &path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<JournalError>(),
        Some(JournalError::NothingToExport)
    ));
    assert!(!path.exists());
}

#[test]
fn test_csv_export_has_one_line_per_trade() {
    let journal = journal_with(4);
    let path = std::env::temp_dir().join(format!("report-{}.csv", Uuid::new_v4()));
    export_csv(&journal.snapshot(), &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Date,Time,Symbol,Side,Entry,Exit,Lot,P/L"));
    assert!(lines[1].contains("XAUUSD"));
    assert!(lines[1].contains("Gold"));
    std::fs::remove_file(path).ok();
}
