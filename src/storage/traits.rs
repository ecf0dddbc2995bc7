use crate::error::Result;
use async_trait::async_trait;

/// Durable key-value persistence for the generation history. The store
/// only moves the full list in and out; ordering and the size cap are
/// owned by [`crate::storage::HistoryList`].
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Most-recent-first list of data URL strings
    async fn load(&self) -> Result<Vec<String>>;

    async fn save(&self, entries: &[String]) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
