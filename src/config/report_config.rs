//! Report and dashboard configuration parsing from environment variables.

use crate::application::report::DEFAULT_REPORT_TITLE;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReportEnvConfig {
    pub output_dir: PathBuf,
    pub title: String,
    pub rows_per_page: usize,
    pub recent_limit: usize,
}

impl ReportEnvConfig {
    pub fn from_env() -> Result<Self> {
        let output_dir = env::var("JOURNAL_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let title =
            env::var("JOURNAL_REPORT_TITLE").unwrap_or_else(|_| DEFAULT_REPORT_TITLE.to_string());

        let rows_per_page = Self::parse_usize("JOURNAL_REPORT_ROWS_PER_PAGE", 40)?;
        if rows_per_page == 0 {
            anyhow::bail!("JOURNAL_REPORT_ROWS_PER_PAGE must be at least 1");
        }

        Ok(Self {
            output_dir,
            title,
            rows_per_page,
            recent_limit: Self::parse_usize("JOURNAL_RECENT_LIMIT", 6)?,
        })
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }
}
