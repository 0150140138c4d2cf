//! The scheduling facade.
//!
//! [`Scheduler`] is the one entry point for callers: it owns the event store
//! and the acknowledged-conflict set, runs queries and conflict scans over the
//! current events, and turns store failures into [`SchedulerError`]s.
//!
//! Scans and queries are plain function calls. Callers that want to coalesce
//! bursts of edits (or keystrokes) debounce on their side and call in once.

use std::rc::Rc;

use agenda_core::query::{self, DEFAULT_UPCOMING_LIMIT};
use agenda_core::{
    Conflict, ConflictKey, Criterion, Event, EventDraft, EventId, ValidationError,
    detect_conflicts,
};
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::acks::AckStore;
use crate::blob::{BlobStore, StorageError};
use crate::store::{EventStore, StoreError};

/// Facade errors.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The draft was rejected before anything changed.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
    /// The change is in memory but could not be written to storage.
    #[error("persistence failed: {0}")]
    PersistenceFailed(#[from] StorageError),
    /// An edit referred to an event that does not exist.
    #[error("event {0} not found")]
    NotFound(EventId),
    /// No id is left to give a new event.
    #[error("no event id left above {0}")]
    IdsExhausted(EventId),
}

impl From<StoreError> for SchedulerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Persist(e) => Self::PersistenceFailed(e),
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::MissingId => Self::ValidationFailed(ValidationError::Empty { field: "id" }),
            StoreError::IdsExhausted(max) => Self::IdsExhausted(max),
        }
    }
}

/// Non-fatal notes attached to a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveWarning {
    /// The event is dated before today.
    PastDate { date: NaiveDate },
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub event: Event,
    pub warnings: Vec<SaveWarning>,
}

/// Event store, query engine and conflict detector behind one API.
pub struct Scheduler<B> {
    events: EventStore<Rc<B>>,
    acks: AckStore<Rc<B>>,
    blob: Rc<B>,
}

impl<B: BlobStore> Scheduler<B> {
    /// Creates a scheduler over `blob`. Call [`Scheduler::load`] before use.
    pub fn new(blob: B) -> Self {
        let blob = Rc::new(blob);
        Self {
            events: EventStore::new(Rc::clone(&blob)),
            acks: AckStore::new(Rc::clone(&blob)),
            blob,
        }
    }

    /// Loads persisted events (or `seed`) and the acknowledged set.
    pub fn load(&mut self, seed: &[Event]) -> &[Event] {
        let acknowledged = self.acks.load();
        tracing::debug!(acknowledged, "loaded acknowledged conflicts");
        self.events.load(seed)
    }

    /// The underlying blob store.
    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// All events in insertion order.
    pub fn events(&self) -> &[Event] {
        self.events.list()
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id)
    }

    /// Validates and stores a draft.
    ///
    /// Events dated before today are saved with a [`SaveWarning::PastDate`].
    /// Editing an event clears acknowledgements that involve it, since its
    /// times may have changed.
    pub fn save_event(&mut self, draft: EventDraft, is_editing: bool) -> Result<Saved, SchedulerError> {
        self.save_event_at(draft, is_editing, today())
    }

    pub fn save_event_at(
        &mut self,
        draft: EventDraft,
        is_editing: bool,
        today: NaiveDate,
    ) -> Result<Saved, SchedulerError> {
        draft.validate()?;

        let mut warnings = Vec::new();
        if let Some(date) = draft.day().filter(|d| *d < today) {
            tracing::warn!(%date, title = %draft.title, "saving event dated in the past");
            warnings.push(SaveWarning::PastDate { date });
        }

        let edited = draft
            .id
            .filter(|id| is_editing && self.events.get(*id).is_some());
        let stored = self.events.upsert(draft, is_editing);
        // A failed write still leaves the edit in memory, so its
        // acknowledgements go either way.
        let forgotten = edited.map(|id| self.acks.forget_event(id));
        let event = stored?;
        if let Some(forgotten) = forgotten {
            forgotten?;
        }
        tracing::debug!(event_id = %event.id, is_editing, "saved event");
        Ok(Saved { event, warnings })
    }

    /// Deletes an event. Returns false for unknown ids.
    pub fn delete_event(&mut self, id: EventId) -> Result<bool, SchedulerError> {
        let existed = self.events.get(id).is_some();
        let removed = self.events.remove(id);
        let forgotten = existed.then(|| self.acks.forget_event(id));
        let removed = removed?;
        if let Some(forgotten) = forgotten {
            forgotten?;
        }
        Ok(removed)
    }

    /// Marks an event completed. Returns false for unknown ids.
    pub fn complete_event(&mut self, id: EventId) -> Result<bool, SchedulerError> {
        Ok(self.events.mark_completed(id)?)
    }

    /// Text search then criterion filter over all events.
    pub fn filtered_view(&self, text: &str, criterion: Criterion, reference: NaiveDate) -> Vec<&Event> {
        self.filtered_view_at(text, criterion, reference, today())
    }

    pub fn filtered_view_at(
        &self,
        text: &str,
        criterion: Criterion,
        reference: NaiveDate,
        today: NaiveDate,
    ) -> Vec<&Event> {
        query::combine(self.events.list(), text, criterion, reference, today)
    }

    /// The next `limit` open events from today on.
    pub fn upcoming(&self, limit: Option<usize>) -> Vec<&Event> {
        self.upcoming_at(limit, today())
    }

    pub fn upcoming_at(&self, limit: Option<usize>, today: NaiveDate) -> Vec<&Event> {
        query::upcoming(
            self.events.list(),
            limit.unwrap_or(DEFAULT_UPCOMING_LIMIT),
            today,
        )
    }

    /// Conflicts across all events that have not been acknowledged yet.
    pub fn conflicts(&self) -> Vec<Conflict<'_>> {
        detect_conflicts(self.events.list())
            .into_iter()
            .filter(|c| !self.acks.contains(&c.key()))
            .collect()
    }

    /// Marks a conflict as surfaced so later scans skip it.
    ///
    /// Returns false if it was already acknowledged.
    pub fn acknowledge_conflict(&mut self, key: ConflictKey) -> Result<bool, SchedulerError> {
        Ok(self.acks.acknowledge(key)?)
    }

    /// Currently acknowledged keys.
    pub fn acknowledged(&self) -> impl Iterator<Item = &ConflictKey> {
        self.acks.keys()
    }
}

/// Today's local wall-clock date.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
