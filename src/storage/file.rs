use crate::{
    error::{Result, StudioError},
    storage::traits::HistoryStore,
};
use async_trait::async_trait;
use std::path::PathBuf;

/// History persisted as a JSON array of data URL strings in a single
/// file, the durable equivalent of one key in client-local storage.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StudioError::SerializationError(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StudioError::StorageError(e.to_string())),
        }
    }

    async fn save(&self, entries: &[String]) -> Result<()> {
        let content = serde_json::to_string(entries)
            .map_err(|e| StudioError::SerializationError(e.to_string()))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StudioError::StorageError(e.to_string()))
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StudioError::StorageError(e.to_string())),
        }
    }
}
