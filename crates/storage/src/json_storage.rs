//! JSON file snapshot store.
//!
//! Keeps the whole engine state in `state.json` under a data directory,
//! plus a small meta marker (version + updated_at) in `meta/`.

use std::path::{Path, PathBuf};
use habitquest_core::EngineSnapshot;
use tokio::fs;
use tracing::{debug, info, warn};
use super::{Result, SnapshotStore, StorageError};

const STATE_FILE: &str = "state.json";
const META_FILE: &str = "state.meta.json";

/// File-based JSON snapshot store.
pub struct JsonSnapshotStore {
    root: PathBuf,
}

impl JsonSnapshotStore {
    /// Create the store, making sure `root` and `root/meta` exist.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("meta")).await?;
        Ok(Self { root })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join("meta").join(META_FILE)
    }

    /// Number of saves so far (0 if never saved).
    pub async fn version(&self) -> Result<u64> {
        let meta: Option<serde_json::Value> = read_json(&self.meta_path()).await?;
        Ok(meta
            .and_then(|m| m.get("version").and_then(|v| v.as_u64()))
            .unwrap_or(0))
    }

    /// Read and increment the save counter, return the new version.
    async fn bump_version(&self) -> Result<u64> {
        let version = self.version().await? + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        write_replacing(&self.meta_path(), &serde_json::to_string_pretty(&meta)?).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl SnapshotStore for JsonSnapshotStore {
    async fn load(&self) -> Result<Option<EngineSnapshot>> {
        let snapshot: Option<EngineSnapshot> = read_json(&self.state_path()).await?;
        if let Some(s) = &snapshot {
            if let Err(e) = s.validate() {
                warn!("Invalid snapshot in {}: {}", self.state_path().display(), e);
                return Err(StorageError::Other(format!(
                    "{}: {}",
                    self.state_path().display(),
                    e
                )));
            }
            debug!(items = s.items.len(), labels = s.labels.len(), "loaded snapshot");
        }
        Ok(snapshot)
    }

    async fn save(&mut self, snapshot: &EngineSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        write_replacing(&self.state_path(), &json).await?;

        let version = self.bump_version().await?;
        info!("Saved snapshot v{} to {}", version, self.state_path().display());
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        for path in [self.state_path(), self.meta_path()] {
            fs::remove_file(&path).await.or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
            })?;
        }
        Ok(())
    }
}

/// Write beside `path`, then rename over it.
async fn write_replacing(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents.as_bytes()).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitquest_core::{
        Difficulty, ItemId, ItemKind, Label, LabelColor, LabelId, ProgressionStats, TrackableItem,
    };
    use crate::StorageError;

    fn sample() -> EngineSnapshot {
        let mut item = TrackableItem::new(
            ItemId::new(),
            ItemKind::Daily,
            "Drink water",
            Difficulty::Easy,
            chrono::Utc::now(),
        )
        .unwrap();
        item.mark_completed(chrono::Utc::now(), true);

        EngineSnapshot {
            items: vec![item],
            stats: ProgressionStats { experience: 10, gold: 2, ..Default::default() },
            labels: vec![Label::new(LabelId::new(), "health", LabelColor::Green).unwrap()],
        }
    }

    #[tokio::test]
    async fn load_without_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path()).await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.version().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn saved_snapshot_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = sample();

        let mut store = JsonSnapshotStore::new(dir.path()).await.unwrap();
        store.save(&snapshot).await.unwrap();
        store.save(&snapshot).await.unwrap();

        let reopened = JsonSnapshotStore::new(dir.path()).await.unwrap();
        assert_eq!(reopened.load().await.unwrap(), Some(snapshot));
        assert_eq!(reopened.version().await.unwrap(), 2);
        assert!(!dir.path().join("state.json.tmp").exists());
        assert!(!dir.path().join("meta").join("state.meta.json.tmp").exists());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path()).await.unwrap();
        store.save(&sample()).await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSnapshotStore::new(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("state.json"), b"{ not json").await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[tokio::test]
    async fn stale_meta_temp_file_is_replaced_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path()).await.unwrap();
        let tmp = dir.path().join("meta").join("state.meta.json.tmp");
        tokio::fs::write(&tmp, b"half written").await.unwrap();

        store.save(&sample()).await.unwrap();
        assert!(!tmp.exists());
        assert_eq!(store.version().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn snapshot_that_fails_validation_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSnapshotStore::new(dir.path()).await.unwrap();
        let mut snapshot = sample();
        snapshot.items.push(snapshot.items[0].clone());
        store.save(&snapshot).await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Other(ref msg) if msg.contains("duplicate item id")));
    }
}
