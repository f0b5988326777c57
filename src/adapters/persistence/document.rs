//! JSON Document Store - Single-file Trade Collection Persistence
//!
//! The journal lives in one pretty-printed JSON array. Every save writes
//! the whole collection to a sibling `.tmp` file and renames it over the
//! document, so the file is always either the old or the new collection.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::domain::trade::Trade;
use crate::ports::repository::TradeRepository;

/// File-backed trade repository.
pub struct JsonFileRepository {
    /// Path to the trade document.
    path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl JsonFileRepository {
    /// Open the document at `path`, creating it as an empty array (and its
    /// parent directory) if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut tmp_name: OsString = path
            .file_name()
            .with_context(|| format!("Trade document path has no file name: {}", path.display()))?
            .to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        }

        let repository = Self { path, tmp_path };

        if fs::try_exists(&repository.path)
            .await
            .context("Failed to probe trade document")?
        {
            debug!(path = %repository.path.display(), "Using existing trade document");
        } else {
            fs::write(&repository.path, b"[]")
                .await
                .context("Failed to create empty trade document")?;
            info!(path = %repository.path.display(), "Trade document created");
        }

        Ok(repository)
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TradeRepository for JsonFileRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<Trade>> {
        let json = fs::read_to_string(&self.path)
            .await
            .context("Failed to read trade document")?;

        let trades: Vec<Trade> =
            serde_json::from_str(&json).context("Failed to parse trade document")?;

        debug!(count = trades.len(), "Trade document loaded");
        Ok(trades)
    }

    #[instrument(skip(self, trades), fields(path = %self.path.display(), count = trades.len()))]
    async fn save(&self, trades: &[Trade]) -> Result<()> {
        let json = serde_json::to_string_pretty(trades)
            .context("Failed to serialize trade collection")?;

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp trade document")?;

        fs::rename(&self.tmp_path, &self.path)
            .await
            .context("Failed to rename trade document")?;

        debug!("Trade document saved");
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        fs::metadata(&self.path)
            .await
            .is_ok_and(|meta| meta.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn trades(values: Value) -> Vec<Trade> {
        serde_json::from_value(values).unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_empty_document_and_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("trades.json");

        let repo = JsonFileRepository::open(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(repo.load().await.unwrap().is_empty());
        assert!(repo.is_healthy().await);
    }

    #[tokio::test]
    async fn test_load_keeps_non_object_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let repo = JsonFileRepository::open(&path).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id(), None);
        repo.save(&loaded).await.unwrap();
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, json!([1, 2]));
    }

    #[tokio::test]
    async fn test_open_keeps_existing_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.json");
        std::fs::write(&path, r#"[{"id":"1","pair":"BTC"}]"#).unwrap();

        let repo = JsonFileRepository::open(&path).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), Some("1"));
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("trades.json"))
            .await
            .unwrap();
        let collection = trades(json!([
            {"id": "2", "zeta": 1, "alpha": {"nested": [1, 2]}},
            {"id": "1", "status": "win", "result": 10.5}
        ]));

        repo.save(&collection).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), collection);
        assert!(!dir.path().join("trades.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_saved_document_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("trades.json"))
            .await
            .unwrap();

        repo.save(&trades(json!([{"id": "1"}]))).await.unwrap();

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert_eq!(raw, "[\n  {\n    \"id\": \"1\"\n  }\n]");
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.json");
        let repo = JsonFileRepository::open(&path).await.unwrap();

        std::fs::write(&path, "{ not json").unwrap();
        assert!(repo.load().await.is_err());

        std::fs::write(&path, r#"{"id": "1"}"#).unwrap();
        assert!(repo.load().await.is_err());
    }

    #[tokio::test]
    async fn test_load_fails_when_document_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.json");
        let repo = JsonFileRepository::open(&path).await.unwrap();

        std::fs::remove_file(&path).unwrap();

        assert!(repo.load().await.is_err());
        assert!(!repo.is_healthy().await);
    }
}
