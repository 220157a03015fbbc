//! Storage configuration parsing from environment variables.

use crate::application::journal::DEFAULT_STORAGE_KEY;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Where and under which key the journal is stored
#[derive(Debug, Clone)]
pub struct StorageEnvConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StorageEnvConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var("JOURNAL_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => {
                let home = env::var("HOME").context("Could not find HOME directory")?;
                PathBuf::from(home).join(".tradejournal")
            }
        };

        let storage_key = env::var("JOURNAL_STORAGE_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            data_dir,
            storage_key,
        })
    }
}
