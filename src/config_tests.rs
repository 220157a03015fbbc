use crate::config::JournalConfig;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const VARS: [&str; 6] = [
    "JOURNAL_DATA_DIR",
    "JOURNAL_STORAGE_KEY",
    "JOURNAL_REPORT_DIR",
    "JOURNAL_REPORT_TITLE",
    "JOURNAL_REPORT_ROWS_PER_PAGE",
    "JOURNAL_RECENT_LIMIT",
];

fn clear_vars() {
    for var in VARS {
        unsafe { env::remove_var(var) };
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_vars();

    let config = JournalConfig::from_env().unwrap();

    assert_eq!(config.storage_key, "tj_ftmo_v1");
    assert!(config.data_dir.ends_with(".tradejournal"));
    assert_eq!(config.report_title, "Backtesting Report");
    assert_eq!(config.rows_per_page, 40);
    assert_eq!(config.recent_limit, 6);
    assert_eq!(config.pdf_output_path(), PathBuf::from("./trade_report.pdf"));
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_vars();
    unsafe {
        env::set_var("JOURNAL_DATA_DIR", "/var/lib/journal");
        env::set_var("JOURNAL_STORAGE_KEY", "desk_b");
        env::set_var("JOURNAL_REPORT_DIR", "/tmp/reports");
        env::set_var("JOURNAL_REPORT_ROWS_PER_PAGE", "25");
        env::set_var("JOURNAL_RECENT_LIMIT", "10");
    }

    let config = JournalConfig::from_env().unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/var/lib/journal"));
    assert_eq!(config.storage_key, "desk_b");
    assert_eq!(config.rows_per_page, 25);
    assert_eq!(config.recent_limit, 10);
    assert_eq!(config.csv_output_path(), PathBuf::from("/tmp/reports/trade_report.csv"));

    // Cleanup
    clear_vars();
}

#[test]
fn test_config_rejects_bad_numbers() {
    let _guard = get_env_lock().lock().unwrap();
    clear_vars();

    unsafe { env::set_var("JOURNAL_REPORT_ROWS_PER_PAGE", "lots") };
    assert!(JournalConfig::from_env().is_err());

    unsafe { env::set_var("JOURNAL_REPORT_ROWS_PER_PAGE", "0") };
    assert!(JournalConfig::from_env().is_err());

    // Cleanup
    clear_vars();
}
