use crate::{error::Result, storage::traits::HistoryStore};
use async_trait::async_trait;
use std::sync::Mutex;

/// Ephemeral in-memory history, used by tests and by sessions that do
/// not configure a history file.
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn save(&self, entries: &[String]) -> Result<()> {
        *self.entries.lock().unwrap() = entries.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
