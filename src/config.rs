//! Configuration module for the trade journal.
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honoured by the binaries), organized by concern: Storage and Report.

mod report_config;
mod storage_config;

pub use report_config::ReportEnvConfig;
pub use storage_config::StorageEnvConfig;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    // Storage
    pub data_dir: PathBuf,
    pub storage_key: String,

    // Report
    pub report_dir: PathBuf,
    pub report_title: String,
    pub rows_per_page: usize,

    // Dashboard
    pub recent_limit: usize,
}

impl JournalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let storage = StorageEnvConfig::from_env().context("Failed to load storage config")?;
        let report = ReportEnvConfig::from_env().context("Failed to load report config")?;

        Ok(Self {
            data_dir: storage.data_dir,
            storage_key: storage.storage_key,
            report_dir: report.output_dir,
            report_title: report.title,
            rows_per_page: report.rows_per_page,
            recent_limit: report.recent_limit,
        })
    }

    pub fn pdf_output_path(&self) -> PathBuf {
        self.report_dir.join("trade_report.pdf")
    }

    pub fn csv_output_path(&self) -> PathBuf {
        self.report_dir.join("trade_report.csv")
    }
}
