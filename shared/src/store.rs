//! Event table access.
//!
//! `EventStore` is the seam handlers talk to. `DynamoEventStore` is the
//! production implementation; `MemoryEventStore` backs tests and local runs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::models::Event;
use crate::{Error, Result};

#[cfg(feature = "aws")]
mod dynamo;

#[cfg(feature = "aws")]
pub use dynamo::DynamoEventStore;

/// Storage for event records.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persist a new record.
    async fn put(&self, event: &Event) -> Result<()>;

    /// Return every record, or only those whose `date` is lexically
    /// `>= from_date` when a bound is given. Order is unspecified.
    async fn scan(&self, from_date: Option<&str>) -> Result<Vec<Event>>;
}

/// In-process event table with switchable failures.
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<Event>>,
    fail_puts: AtomicBool,
    fail_scans: AtomicBool,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the table with existing records.
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Self::default()
        }
    }

    /// Make subsequent `put` calls fail.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `scan` calls fail.
    pub fn fail_scans(&self, fail: bool) {
        self.fail_scans.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every stored record, in insertion order.
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn put(&self, event: &Event) -> Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(Error::Store("Requested resource not found".to_string()));
        }
        self.lock().push(event.clone());
        Ok(())
    }

    async fn scan(&self, from_date: Option<&str>) -> Result<Vec<Event>> {
        if self.fail_scans.load(Ordering::SeqCst) {
            return Err(Error::Store("Requested resource not found".to_string()));
        }
        Ok(self
            .lock()
            .iter()
            .filter(|event| from_date.map_or(true, |from| event.date.as_str() >= from))
            .cloned()
            .collect())
    }
}
