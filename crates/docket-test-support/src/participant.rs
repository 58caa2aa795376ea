//! Test participants — counting and failing `Participant` mocks.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docket_core::error::DomainError;
use docket_core::repository::Participant;

/// A participant that always prepares successfully and counts how often
/// each protocol step was invoked.
#[derive(Debug, Default)]
pub struct CountingParticipant {
    prepares: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl CountingParticipant {
    /// Creates a participant with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `prepare` calls observed.
    #[must_use]
    pub fn prepare_count(&self) -> usize {
        self.prepares.load(Ordering::SeqCst)
    }

    /// Number of `commit` calls observed.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Number of `rollback` calls observed.
    #[must_use]
    pub fn rollback_count(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Participant for CountingParticipant {
    fn name(&self) -> &str {
        "counting-participant"
    }

    async fn prepare(&self) -> Result<(), DomainError> {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn commit(&self) {
        self.commits.fetch_add(1, Ordering::SeqCst);
    }

    fn rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
    }
}

/// A participant whose `prepare` always fails. Useful for forcing the
/// commit-failure path of a scope.
#[derive(Debug, Default)]
pub struct FailingParticipant {
    rollbacks: AtomicUsize,
}

impl FailingParticipant {
    /// Creates a failing participant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `rollback` calls observed.
    #[must_use]
    pub fn rollback_count(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Participant for FailingParticipant {
    fn name(&self) -> &str {
        "failing-participant"
    }

    async fn prepare(&self) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure(
            "synthetic prepare failure".into(),
        ))
    }

    fn commit(&self) {}

    fn rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
    }
}
