pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;
pub use traits::HistoryStore;

/// Maximum number of history entries kept
pub const HISTORY_CAP: usize = 12;

/// Bounded most-recent-first list of generated images (as data URLs).
/// New entries are inserted at the head; when the cap is exceeded the
/// oldest entry falls off the tail.
#[derive(Debug, Clone)]
pub struct HistoryList {
    entries: Vec<String>,
    cap: usize,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::with_cap(HISTORY_CAP)
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut list = Self::new();
        for entry in entries.into_iter().rev() {
            list.push(entry);
        }
        list
    }

    pub fn push(&mut self, entry: String) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.cap);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for HistoryList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_inserts_at_head() {
        let mut history = HistoryList::new();
        history.push("first".to_string());
        history.push("second".to_string());

        assert_eq!(history.entries(), &["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = HistoryList::new();
        for i in 0..13 {
            history.push(format!("entry-{}", i));
        }

        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.entries()[0], "entry-12");
        // entry-0 fell off the tail
        assert_eq!(history.entries()[HISTORY_CAP - 1], "entry-1");
    }

    #[test]
    fn test_from_entries_preserves_order_and_cap() {
        let entries: Vec<String> = (0..20).map(|i| format!("entry-{}", i)).collect();
        let history = HistoryList::from_entries(entries);

        assert_eq!(history.len(), HISTORY_CAP);
        assert_eq!(history.entries()[0], "entry-0");
        assert_eq!(history.entries()[1], "entry-1");
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryList::new();
        history.push("entry".to_string());
        history.clear();
        assert!(history.is_empty());
    }
}
