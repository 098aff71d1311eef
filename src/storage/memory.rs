//! In-memory stores for driving the coordinator in unit tests

use crate::storage::traits::{PostSink, SeenStore, StorageResult};
use crate::storage::{ArticleRecord, SeenUrls};
use std::sync::Mutex;

/// Seen store kept in memory
#[derive(Debug, Default)]
pub struct MemorySeenStore {
    seen: Mutex<SeenUrls>,
    saves: Mutex<usize>,
}

impl MemorySeenStore {
    pub fn new(initial: SeenUrls) -> Self {
        Self {
            seen: Mutex::new(initial),
            saves: Mutex::new(0),
        }
    }

    /// Returns the last saved set
    pub fn snapshot(&self) -> SeenUrls {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of times `save` was called
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or_default()
    }
}

impl SeenStore for MemorySeenStore {
    fn load(&self) -> StorageResult<SeenUrls> {
        Ok(self.snapshot())
    }

    fn save(&self, seen: &SeenUrls) -> StorageResult<()> {
        if let Ok(mut stored) = self.seen.lock() {
            *stored = seen.clone();
        }
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }
}

/// Post sink that records every append call
#[derive(Debug, Default)]
pub struct MemoryPostSink {
    batches: Mutex<Vec<Vec<ArticleRecord>>>,
}

impl MemoryPostSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All appended records, in append order
    pub fn records(&self) -> Vec<ArticleRecord> {
        self.batches
            .lock()
            .map(|b| b.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of non-empty append operations
    pub fn append_count(&self) -> usize {
        self.batches.lock().map(|b| b.len()).unwrap_or_default()
    }
}

impl PostSink for MemoryPostSink {
    fn ensure_initialized(&self) -> StorageResult<()> {
        Ok(())
    }

    fn append(&self, records: &[ArticleRecord]) -> StorageResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        if let Ok(mut batches) = self.batches.lock() {
            batches.push(records.to_vec());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_seen_round_trip() {
        let store = MemorySeenStore::new(["a"].into_iter().collect());
        let mut seen = store.load().unwrap();
        seen.insert("b");
        store.save(&seen).unwrap();
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_sink_skips_empty_batches() {
        let sink = MemoryPostSink::new();
        sink.append(&[]).unwrap();
        sink.append(&[ArticleRecord::web("acme", "u", "", "c")]).unwrap();
        assert_eq!(sink.append_count(), 1);
        assert_eq!(sink.records().len(), 1);
    }
}
