//! The authoritative event collection.
//!
//! Mutations update memory first and then write the whole collection back to
//! the blob store. A failed write is reported but the in-memory change stays,
//! so the user's action is not lost from the running session.

use std::collections::HashSet;

use agenda_core::{Event, EventDraft, EventId};
use chrono::Utc;
use thiserror::Error;

use crate::blob::{BlobStore, StorageError};

/// Blob key holding the serialized event list.
pub const EVENTS_KEY: &str = "calendarEvents";

/// Event store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Memory was updated but the write to durable storage failed.
    #[error("failed to persist events: {0}")]
    Persist(#[from] StorageError),
    /// An edit referred to an event that does not exist.
    #[error("event {0} not found")]
    NotFound(EventId),
    /// An edit was submitted without an event id.
    #[error("cannot edit an event without an id")]
    MissingId,
    /// Some stored event already holds the largest possible id.
    #[error("no event id left above {0}")]
    IdsExhausted(EventId),
}

/// In-memory event list backed by a [`BlobStore`].
///
/// Events keep their insertion order, which is the default view order.
pub struct EventStore<B> {
    blob: B,
    events: Vec<Event>,
}

impl<B: BlobStore> EventStore<B> {
    /// Creates an empty store. Call [`EventStore::load`] to read persisted state.
    pub const fn new(blob: B) -> Self {
        Self {
            blob,
            events: Vec::new(),
        }
    }

    /// Reads the persisted event list.
    ///
    /// Falls back to `seed` when nothing is stored or the stored document
    /// cannot be read or parsed. Never fails; problems are logged.
    pub fn load(&mut self, seed: &[Event]) -> &[Event] {
        let loaded = match self.blob.read(EVENTS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Event>>(&json) {
                Ok(events) => Some(events),
                Err(e) => {
                    tracing::warn!(error = %e, "stored events are unparsable; using seed data");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(seed_count = seed.len(), "no stored events; using seed data");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored events; using seed data");
                None
            }
        };

        self.events = dedup_ids(loaded.unwrap_or_else(|| seed.to_vec()));
        tracing::debug!(event_count = self.events.len(), "loaded events");
        &self.events
    }

    /// All events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.is(id))
    }

    /// The underlying blob store.
    pub const fn blob(&self) -> &B {
        &self.blob
    }

    /// Inserts a new event or replaces an existing one.
    ///
    /// New events get a fresh id and `completed = false` unless the draft says
    /// otherwise. Edits keep the id and position of the event they replace, and
    /// keep its completion state unless the draft sets one. Editing an unknown
    /// id is an error and leaves the store untouched.
    pub fn upsert(&mut self, draft: EventDraft, is_editing: bool) -> Result<Event, StoreError> {
        self.upsert_at(draft, is_editing, Utc::now().timestamp_millis())
    }

    fn upsert_at(
        &mut self,
        draft: EventDraft,
        is_editing: bool,
        now_ms: i64,
    ) -> Result<Event, StoreError> {
        let event = if is_editing {
            let id = draft.id.ok_or(StoreError::MissingId)?;
            let slot = self
                .events
                .iter_mut()
                .find(|e| e.is(id))
                .ok_or(StoreError::NotFound(id))?;
            let event = draft.into_event(id, slot.completed);
            slot.clone_from(&event);
            event
        } else {
            let id = self.next_id(now_ms)?;
            let event = draft.into_event(id, false);
            self.events.push(event.clone());
            event
        };

        self.persist()?;
        Ok(event)
    }

    /// Deletes an event. Returns whether anything was removed.
    ///
    /// Unknown ids are not an error and do not trigger a write.
    pub fn remove(&mut self, id: EventId) -> Result<bool, StoreError> {
        let before = self.events.len();
        self.events.retain(|e| !e.is(id));
        if self.events.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Marks an event completed. Returns whether the event exists.
    pub fn mark_completed(&mut self, id: EventId) -> Result<bool, StoreError> {
        let Some(event) = self.events.iter_mut().find(|e| e.is(id)) else {
            return Ok(false);
        };
        event.completed = true;
        self.persist()?;
        Ok(true)
    }

    /// Writes the full event list to the blob store.
    pub fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.events)?;
        self.blob.write(EVENTS_KEY, &json)?;
        tracing::debug!(event_count = self.events.len(), "persisted events");
        Ok(())
    }

    /// Creation timestamp in milliseconds, bumped past every existing id.
    fn next_id(&self, now_ms: i64) -> Result<EventId, StoreError> {
        let max = self.events.iter().map(|e| e.id.value()).max();
        match max {
            Some(max) if max >= now_ms => max
                .checked_add(1)
                .map(EventId::new)
                .ok_or(StoreError::IdsExhausted(EventId::new(max))),
            _ => Ok(EventId::new(now_ms)),
        }
    }
}

/// Keeps the first event for each id.
fn dedup_ids(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    let total = events.len();
    let unique: Vec<Event> = events.into_iter().filter(|e| seen.insert(e.id)).collect();
    if unique.len() < total {
        tracing::warn!(
            dropped = total - unique.len(),
            "dropped events with duplicate ids"
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;

    fn draft(title: &str) -> EventDraft {
        EventDraft::new(title)
            .on("2024-03-10")
            .between("09:00", "10:00")
    }

    fn seed() -> Vec<Event> {
        vec![draft("seeded").into_event(EventId::new(1), false)]
    }

    fn store() -> EventStore<MemoryBlobStore> {
        EventStore::new(MemoryBlobStore::new())
    }

    #[test]
    fn load_uses_seed_when_nothing_is_stored() {
        let mut store = store();
        let loaded = store.load(&seed());
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "seeded");
        assert_eq!(store.blob().write_count(), 0);
    }

    #[test]
    fn load_uses_seed_when_stored_document_is_garbage() {
        let mut store = store();
        store.blob().insert_raw(EVENTS_KEY, "{not json");
        assert_eq!(store.load(&seed()).len(), 1);
    }

    #[test]
    fn load_prefers_stored_events_over_seed() {
        let mut store = store();
        store.blob().insert_raw(EVENTS_KEY, "[]");
        assert!(store.load(&seed()).is_empty());
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let mut store = store();
        let mut events = seed();
        events.push(draft("dupe").into_event(EventId::new(1), false));
        let loaded = store.load(&events);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "seeded");
    }

    #[test]
    fn insert_assigns_fresh_ids_and_defaults() {
        let mut store = store();
        let first = store.upsert_at(draft("a"), false, 1_000).unwrap();
        let second = store.upsert_at(draft("b"), false, 1_000).unwrap();
        let third = store.upsert_at(draft("c"), false, 5_000).unwrap();

        assert_eq!(first.id, EventId::new(1_000));
        assert_eq!(second.id, EventId::new(1_001));
        assert_eq!(third.id, EventId::new(5_000));
        assert!(!first.completed);
        assert_eq!(first.color, agenda_core::DEFAULT_COLOR);
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn insert_ignores_id_on_draft() {
        let mut store = store();
        let mut d = draft("a");
        d.id = Some(EventId::new(42));
        let event = store.upsert_at(d, false, 7).unwrap();
        assert_eq!(event.id, EventId::new(7));
    }

    #[test]
    fn insert_after_largest_id_is_an_error() {
        let mut store = store();
        store
            .blob()
            .insert_raw(EVENTS_KEY, r#"[{"id": 9223372036854775807, "title": "x"}]"#);
        store.load(&[]);

        let err = store.upsert(EventDraft::new("y"), false).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted(id) if id == EventId::new(i64::MAX)));
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.blob().write_count(), 0);

        // One below the ceiling still allocates the last id.
        let mut store = EventStore::new(MemoryBlobStore::new());
        store
            .blob()
            .insert_raw(EVENTS_KEY, r#"[{"id": 9223372036854775806, "title": "x"}]"#);
        store.load(&[]);
        let event = store.upsert(EventDraft::new("y"), false).unwrap();
        assert_eq!(event.id, EventId::new(i64::MAX));
    }

    #[test]
    fn edit_replaces_in_place_and_keeps_completion() {
        let mut store = store();
        let a = store.upsert_at(draft("a"), false, 1).unwrap();
        store.upsert_at(draft("b"), false, 2).unwrap();
        store.mark_completed(a.id).unwrap();

        let mut edit = EventDraft::from(store.get(a.id).unwrap().clone());
        edit.title = "renamed".into();
        edit.completed = None;
        let edited = store.upsert(edit, true).unwrap();

        assert_eq!(edited.id, a.id);
        assert!(edited.completed);
        assert_eq!(store.list()[0].title, "renamed");
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn edit_of_unknown_id_is_rejected_without_write() {
        let mut store = store();
        let mut edit = draft("ghost");
        edit.id = Some(EventId::new(99));
        let err = store.upsert(edit, true).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == EventId::new(99)));
        assert!(store.list().is_empty());
        assert_eq!(store.blob().write_count(), 0);

        let err = store.upsert(draft("no id"), true).unwrap_err();
        assert!(matches!(err, StoreError::MissingId));
    }

    #[test]
    fn each_mutation_writes_once() {
        let mut store = store();
        let a = store.upsert_at(draft("a"), false, 1).unwrap();
        assert_eq!(store.blob().write_count(), 1);
        assert!(store.mark_completed(a.id).unwrap());
        assert_eq!(store.blob().write_count(), 2);
        assert!(store.remove(a.id).unwrap());
        assert_eq!(store.blob().write_count(), 3);
    }

    #[test]
    fn missing_ids_return_false_without_write() {
        let mut store = store();
        assert!(!store.remove(EventId::new(1)).unwrap());
        assert!(!store.mark_completed(EventId::new(1)).unwrap());
        assert_eq!(store.blob().write_count(), 0);
    }

    #[test]
    fn completion_is_idempotent() {
        let mut store = store();
        let a = store.upsert_at(draft("a"), false, 1).unwrap();
        store.mark_completed(a.id).unwrap();
        let once = store.get(a.id).unwrap().clone();
        store.mark_completed(a.id).unwrap();
        assert_eq!(store.get(a.id).unwrap(), &once);
    }

    #[test]
    fn persist_failure_keeps_memory_state() {
        let mut store = store();
        store.blob().fail_writes(true);
        let err = store.upsert_at(draft("a"), false, 1).unwrap_err();
        assert!(matches!(err, StoreError::Persist(StorageError::Unavailable(_))));
        assert_eq!(store.list().len(), 1);
        assert!(store.blob().raw(EVENTS_KEY).is_none());
    }

    #[test]
    fn persisted_state_reloads() {
        let blob = MemoryBlobStore::new();
        let mut store = EventStore::new(&blob);
        let a = store.upsert_at(draft("a"), false, 1).unwrap();
        let b = store.upsert_at(draft("b"), false, 2).unwrap();
        store.mark_completed(b.id).unwrap();
        store.remove(a.id).unwrap();

        let mut reloaded = EventStore::new(&blob);
        let events = reloaded.load(&seed());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, b.id);
        assert!(events[0].completed);
    }
}
