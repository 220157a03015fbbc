use crate::domain::repositories::KeyValueStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key-value store backed by one JSON file per key in a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory {:?}", dir))?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read journal file {:?}", path))?;
        debug!("Read {} bytes from {:?}", content.len(), path);
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value).context("Failed to write temp journal file")?;
        fs::rename(&temp_path, &path).context("Failed to rename journal file")?;

        info!("Saved journal to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("tradejournal-store-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = JsonFileStore::new(scratch_dir()).unwrap();
        assert_eq!(store.get("tj_ftmo_v1").unwrap(), None);
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_set_then_get() {
        let store = JsonFileStore::new(scratch_dir()).unwrap();
        store.set("tj_ftmo_v1", "[]").unwrap();
        store.set("tj_ftmo_v1", r#"[{"_id":"x"}]"#).unwrap();

        assert_eq!(
            store.get("tj_ftmo_v1").unwrap().as_deref(),
            Some(r#"[{"_id":"x"}]"#)
        );
        assert!(!store.path_for("tj_ftmo_v1").with_extension("tmp").exists());
        fs::remove_dir_all(store.dir()).ok();
    }

    #[test]
    fn test_key_is_sanitized() {
        let store = JsonFileStore::new(scratch_dir()).unwrap();
        let path = store.path_for("../evil key");
        assert_eq!(path.file_name().unwrap(), "___evil_key.json");
        assert_eq!(path.parent().unwrap(), store.dir());
        fs::remove_dir_all(store.dir()).ok();
    }
}
