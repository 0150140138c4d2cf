//! Conflicts the user has already been told about.

use std::collections::BTreeSet;

use agenda_core::{ConflictKey, EventId};

use crate::blob::{BlobStore, StorageError};

/// Blob key holding the acknowledged conflict keys.
pub const ACKS_KEY: &str = "acknowledgedConflicts";

/// Persisted set of acknowledged [`ConflictKey`]s.
///
/// Lives next to the event list in the same blob store but is read and written
/// independently of it.
pub struct AckStore<B> {
    blob: B,
    keys: BTreeSet<ConflictKey>,
}

impl<B: BlobStore> AckStore<B> {
    pub const fn new(blob: B) -> Self {
        Self {
            blob,
            keys: BTreeSet::new(),
        }
    }

    /// Reads the persisted set. Missing or unreadable state yields an empty set.
    pub fn load(&mut self) -> usize {
        self.keys.clear();
        let raw = match self.blob.read(ACKS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return 0,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read acknowledged conflicts");
                return 0;
            }
        };
        let strings: Vec<String> = match serde_json::from_str(&raw) {
            Ok(strings) => strings,
            Err(e) => {
                tracing::warn!(error = %e, "acknowledged conflicts are unparsable; starting empty");
                return 0;
            }
        };
        for s in strings {
            match s.parse::<ConflictKey>() {
                Ok(key) => {
                    self.keys.insert(key);
                }
                Err(e) => tracing::warn!(error = %e, "skipping acknowledged conflict"),
            }
        }
        self.keys.len()
    }

    pub fn contains(&self, key: &ConflictKey) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConflictKey> {
        self.keys.iter()
    }

    /// Records a key. Returns false (and skips the write) if it was already known.
    pub fn acknowledge(&mut self, key: ConflictKey) -> Result<bool, StorageError> {
        if !self.keys.insert(key) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Drops every key that involves `id`. Returns how many were dropped.
    pub fn forget_event(&mut self, id: EventId) -> Result<usize, StorageError> {
        let before = self.keys.len();
        self.keys.retain(|k| !k.involves(id));
        let dropped = before - self.keys.len();
        if dropped > 0 {
            tracing::debug!(event_id = %id, dropped, "cleared acknowledged conflicts");
            self.persist()?;
        }
        Ok(dropped)
    }

    /// Writes the full set to the blob store.
    pub fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.keys)?;
        self.blob.write(ACKS_KEY, &json)
    }
}
