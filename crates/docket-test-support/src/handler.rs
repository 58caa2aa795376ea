//! Test handlers — recording, failing, and slow `EventHandler` mocks.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use docket_core::error::DomainError;
use docket_core::event::EventEnvelope;
use docket_core::handler::EventHandler;

/// Shared invocation journal: handlers append their name as they run, so
/// tests can assert dispatch order across several handlers.
pub type Journal = Arc<Mutex<Vec<String>>>;

/// A handler that succeeds on every event and records what it received.
#[derive(Debug)]
pub struct RecordingHandler {
    name: String,
    received: Mutex<Vec<EventEnvelope>>,
    journal: Option<Journal>,
}

impl RecordingHandler {
    /// Creates a recording handler with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            received: Mutex::new(Vec::new()),
            journal: None,
        }
    }

    /// Creates a recording handler that also appends its name to a shared
    /// journal on every invocation.
    #[must_use]
    pub fn with_journal(name: impl Into<String>, journal: Journal) -> Self {
        Self {
            name: name.into(),
            received: Mutex::new(Vec::new()),
            journal: Some(journal),
        }
    }

    /// Returns a snapshot of every envelope this handler received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn received(&self) -> Vec<EventEnvelope> {
        self.received.lock().unwrap().clone()
    }

    /// Number of envelopes this handler received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn received_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<(), DomainError> {
        self.received.lock().unwrap().push(event.clone());
        if let Some(journal) = &self.journal {
            journal.lock().unwrap().push(self.name.clone());
        }
        Ok(())
    }
}

/// A handler that fails on every event. Useful for isolation tests.
#[derive(Debug)]
pub struct FailingHandler {
    name: String,
    journal: Option<Journal>,
}

impl FailingHandler {
    /// Creates a failing handler with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            journal: None,
        }
    }

    /// Creates a failing handler that appends its name to a shared journal
    /// before failing.
    #[must_use]
    pub fn with_journal(name: impl Into<String>, journal: Journal) -> Self {
        Self {
            name: name.into(),
            journal: Some(journal),
        }
    }
}

#[async_trait]
impl EventHandler for FailingHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, _event: &EventEnvelope) -> Result<(), DomainError> {
        if let Some(journal) = &self.journal {
            journal.lock().unwrap().push(self.name.clone());
        }
        Err(DomainError::Infrastructure(
            "synthetic handler failure".into(),
        ))
    }
}

/// A handler that sleeps before succeeding. Useful for timeout tests.
#[derive(Debug)]
pub struct SlowHandler {
    name: String,
    delay: Duration,
}

impl SlowHandler {
    /// Creates a handler that sleeps for `delay` on every event.
    #[must_use]
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
        }
    }
}

#[async_trait]
impl EventHandler for SlowHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, _event: &EventEnvelope) -> Result<(), DomainError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
