//! Storage module for persisting crawl state and output
//!
//! Two durable artifacts exist:
//! - the seen set: every URL already processed, so later runs skip it
//! - the post dataset: append-only CSV rows consumed by downstream analysis
//!
//! Both sit behind traits so unit tests can drive the coordinator with
//! in-memory stores.

mod dataset;
#[cfg(test)]
mod memory;
mod seen;
mod traits;

pub use dataset::{CsvPostStore, POST_COLUMNS};
#[cfg(test)]
pub use memory::{MemoryPostSink, MemorySeenStore};
pub use seen::JsonSeenStore;
pub use traits::{PostSink, SeenStore, StorageError, StorageResult};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Platform value written for every record produced by this crawler
pub const WEB_PLATFORM: &str = "web";

/// One article row in the post dataset
///
/// Field order is the column order of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub platform: String,
    pub competitor: String,
    pub author: String,
    pub date: String,
    pub url: String,
    pub content: String,
    pub likes: u64,
    pub comments: u64,
    pub reposts: u64,
}

impl ArticleRecord {
    /// Builds a web article record; engagement counters start at zero
    pub fn web(competitor: &str, url: &str, date: &str, content: &str) -> Self {
        Self {
            platform: WEB_PLATFORM.to_string(),
            competitor: competitor.to_string(),
            author: String::new(),
            date: date.to_string(),
            url: url.to_string(),
            content: content.to_string(),
            likes: 0,
            comments: 0,
            reposts: 0,
        }
    }
}

/// Set of URLs already processed across runs
///
/// Kept ordered so the persisted form is sorted and reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenUrls(BTreeSet<String>);

impl SeenUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.0.contains(url)
    }

    /// Marks a URL as processed; returns false if it was already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        self.0.insert(url.into())
    }

    /// Forgets a URL so the next run processes it again
    pub fn remove(&mut self, url: &str) -> bool {
        self.0.remove(url)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SeenUrls {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
