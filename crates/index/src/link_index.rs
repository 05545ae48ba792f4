//! Reverse link index: target item -> incoming references
//!
//! The index is a denormalized side-structure maintained incrementally on
//! every mutation, never recomputed per query. It does not validate entries
//! against actual field content; an entry with no live reference is a
//! transient inconsistency the repair engine resolves, not an index error.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use tracing::debug;

use linkmend_core::{ItemLink, ItemRef, Result};

/// Reverse-reference index from target item to incoming [`ItemLink`]s
///
/// Insert and remove are idempotent under value equality. Interior
/// mutability keeps the index shareable by reference between the report
/// builder and the repair engine within one request.
#[derive(Debug, Default)]
pub struct LinkIndex {
    entries: RwLock<HashMap<ItemRef, Vec<ItemLink>>>,
}

impl LinkIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// All links whose target is the given item, as a sorted snapshot
    ///
    /// The snapshot is cloned under a read lock, so one report-building
    /// pass sees a consistent, deterministic sequence regardless of
    /// concurrent mutation.
    pub fn references_to(&self, target: &ItemRef) -> Vec<ItemLink> {
        let entries = self.entries.read();
        let mut links = entries.get(target).cloned().unwrap_or_default();
        links.sort();
        links
    }

    /// Add a link; a value-equal entry is not duplicated
    pub fn insert(&self, link: ItemLink) {
        let target = link.target_ref();
        let mut entries = self.entries.write();
        let bucket = entries.entry(target).or_default();
        if !bucket.contains(&link) {
            bucket.push(link);
        }
    }

    /// Remove a link; removing a non-present link is a no-op
    ///
    /// Empty buckets are dropped so the index does not accumulate dead
    /// target keys.
    pub fn remove(&self, link: &ItemLink) {
        let target = link.target_ref();
        let mut entries = self.entries.write();
        if let Some(bucket) = entries.get_mut(&target) {
            bucket.retain(|existing| existing != link);
            if bucket.is_empty() {
                entries.remove(&target);
            }
        }
    }

    /// Total number of links in the index
    pub fn len(&self) -> usize {
        self.entries.read().values().map(Vec::len).sum()
    }

    /// Whether the index holds no links
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Persist the index to a file
    ///
    /// The on-disk form is a flat bincode-encoded link list; buckets are
    /// rebuilt on load.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let links: Vec<ItemLink> = {
            let entries = self.entries.read();
            entries.values().flatten().cloned().collect()
        };
        let encoded = bincode::serialize(&links)?;
        fs::write(path, encoded)?;
        debug!(links = links.len(), path = %path.display(), "link index saved");
        Ok(())
    }

    /// Load an index from a file
    ///
    /// A missing file yields an empty index: the index is eventually
    /// consistent with content and can always be repopulated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let bytes = fs::read(path)?;
        let links: Vec<ItemLink> = bincode::deserialize(&bytes)?;
        debug!(links = links.len(), path = %path.display(), "link index loaded");

        let index = Self::new();
        for link in links {
            index.insert(link);
        }
        Ok(index)
    }
}
