//! Storage layer and scheduling facade for the agenda scheduler.
//!
//! State lives in a [`BlobStore`] as two independent JSON documents: the event
//! list (under [`EVENTS_KEY`]) and the acknowledged conflict keys (under
//! [`ACKS_KEY`]). Every mutation rewrites the affected document in full.
//!
//! # Thread Safety
//!
//! [`SqliteBlobStore`] wraps a `rusqlite::Connection` and [`Scheduler`] shares
//! its store through an `Rc`, so a scheduler is neither `Send` nor `Sync`. Run
//! it on one thread and hand results to others.
//!
//! # Concurrent Writers
//!
//! Saves replace whole records. With more than one writer against the same
//! store, a per-event version would be needed to avoid lost updates; nothing
//! here attempts that.

mod acks;
mod blob;
mod scheduler;
mod store;

pub use acks::{ACKS_KEY, AckStore};
pub use blob::{BlobStore, MemoryBlobStore, SqliteBlobStore, StorageError};
pub use scheduler::{SaveWarning, Saved, Scheduler, SchedulerError};
pub use store::{EVENTS_KEY, EventStore, StoreError};
