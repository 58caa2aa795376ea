//! The Unit-of-Work scope and its state machine.

use std::sync::Arc;

use docket_core::event::EventEnvelope;
use docket_core::repository::Participant;
use docket_event_bus::EventBus;

use crate::error::UnitOfWorkError;

/// Lifecycle state of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    /// Mutations and event queuing are accepted.
    Open,
    /// Terminal: mutations persisted, queued events dispatched.
    Committed,
    /// Terminal: mutations and queued events discarded.
    RolledBack,
}

impl std::fmt::Display for ScopeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Committed => "committed",
            Self::RolledBack => "rolled_back",
        })
    }
}

/// Coordinates repository mutations and deferred event publication under
/// one atomic boundary.
///
/// A scope is created per use-case invocation and reaches exactly one
/// terminal state. Events queued through [`raise`](Self::raise) are
/// handed to the bus only after every participant has durably persisted;
/// on any failure path nothing is dispatched. Dropping an open scope
/// rolls it back, so cancellation before commit behaves exactly like an
/// explicit rollback.
///
/// Scope state is private to one logical transaction: operations take
/// `&mut self` and the scope is not meant to be shared across concurrent
/// callers.
pub struct UnitOfWork {
    bus: Arc<EventBus>,
    state: ScopeState,
    participants: Vec<Arc<dyn Participant>>,
    pending_events: Vec<EventEnvelope>,
}

impl UnitOfWork {
    /// Opens a scope that will flush committed events to `bus`.
    #[must_use]
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            state: ScopeState::Open,
            participants: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScopeState {
        self.state
    }

    /// Events queued so far, in queue order.
    #[must_use]
    pub fn pending_events(&self) -> &[EventEnvelope] {
        &self.pending_events
    }

    /// Adds a participant to the scope. Idempotent: enlisting the same
    /// participant again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the scope is already terminal.
    pub fn enlist(&mut self, participant: Arc<dyn Participant>) -> Result<(), UnitOfWorkError> {
        self.ensure_open("enlist in")?;
        if !self
            .participants
            .iter()
            .any(|enlisted| Arc::ptr_eq(enlisted, &participant))
        {
            self.participants.push(participant);
        }
        Ok(())
    }

    /// Queues an event for dispatch after a successful commit.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the scope is already terminal.
    pub fn raise(&mut self, event: EventEnvelope) -> Result<(), UnitOfWorkError> {
        self.ensure_open("raise on")?;
        tracing::debug!(event_type = event.event_type(), "event queued");
        self.pending_events.push(event);
        Ok(())
    }

    /// Atomically persists every participant's staged mutations, then
    /// dispatches the queued events in queue order, one `publish` per
    /// event, and marks the scope committed.
    ///
    /// Persistence fully precedes notification: the event flush does not
    /// begin until every participant has prepared and committed.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the scope is already terminal. Returns
    /// `CommitFailed` if a participant fails to prepare; the scope is
    /// then rolled back and no event reaches any subscriber.
    pub async fn commit(&mut self) -> Result<(), UnitOfWorkError> {
        self.ensure_open("commit")?;

        for participant in &self.participants {
            if let Err(source) = participant.prepare().await {
                tracing::warn!(
                    participant = participant.name(),
                    error = %source,
                    "participant failed to prepare; rolling back scope"
                );
                self.abort();
                return Err(UnitOfWorkError::CommitFailed { source });
            }
        }

        for participant in &self.participants {
            participant.commit();
        }

        let events = std::mem::take(&mut self.pending_events);
        for event in &events {
            let summary = self.bus.publish(event).await;
            tracing::debug!(
                event_type = event.event_type(),
                delivered = summary.delivered,
                failed = summary.failed,
                "committed event dispatched"
            );
        }
        self.state = ScopeState::Committed;
        Ok(())
    }

    /// Discards staged mutations and queued events.
    ///
    /// Idempotent: rolling back a scope that already rolled back is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `IllegalState` if the scope already committed.
    pub fn rollback(&mut self) -> Result<(), UnitOfWorkError> {
        match self.state {
            ScopeState::RolledBack => Ok(()),
            ScopeState::Committed => Err(UnitOfWorkError::IllegalState {
                operation: "rollback",
                state: self.state,
            }),
            ScopeState::Open => {
                self.abort();
                Ok(())
            }
        }
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), UnitOfWorkError> {
        if self.state == ScopeState::Open {
            Ok(())
        } else {
            Err(UnitOfWorkError::IllegalState {
                operation,
                state: self.state,
            })
        }
    }

    fn abort(&mut self) {
        for participant in &self.participants {
            participant.rollback();
        }
        self.pending_events.clear();
        self.state = ScopeState::RolledBack;
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if self.state == ScopeState::Open {
            tracing::debug!("scope dropped while open; rolling back");
            self.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use docket_core::handler::EventHandler;
    use docket_test_support::{
        CountingParticipant, FailingParticipant, FixedClock, RecordingHandler, StubEvent,
    };

    use super::*;

    fn fixed_clock() -> FixedClock {
        FixedClock(chrono::Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn envelope(event_type: &'static str) -> EventEnvelope {
        EventEnvelope::new(&StubEvent::new(event_type), &fixed_clock())
    }

    fn bus_with_handler(event_type: &str) -> (Arc<EventBus>, Arc<RecordingHandler>) {
        let bus = Arc::new(EventBus::new());
        let handler = Arc::new(RecordingHandler::new("observer"));
        bus.subscribe(event_type, Arc::clone(&handler) as Arc<dyn EventHandler>);
        (bus, handler)
    }

    #[tokio::test]
    async fn test_commit_flushes_queued_events_in_queue_order() {
        let bus = Arc::new(EventBus::new());
        let handler = Arc::new(RecordingHandler::new("observer"));
        bus.subscribe("users.created", Arc::clone(&handler) as Arc<dyn EventHandler>);

        let mut scope = UnitOfWork::new(Arc::clone(&bus));
        let first = envelope("users.created");
        let second = envelope("users.created");
        scope.raise(first.clone()).unwrap();
        scope.raise(second.clone()).unwrap();

        scope.commit().await.unwrap();

        assert_eq!(scope.state(), ScopeState::Committed);
        let received = handler.received();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].event_id(), first.event_id());
        assert_eq!(received[1].event_id(), second.event_id());
    }

    #[tokio::test]
    async fn test_commit_drives_participants_through_prepare_then_commit() {
        let (bus, _handler) = bus_with_handler("users.created");
        let participant = Arc::new(CountingParticipant::new());

        let mut scope = UnitOfWork::new(bus);
        scope
            .enlist(Arc::clone(&participant) as Arc<dyn Participant>)
            .unwrap();
        scope.commit().await.unwrap();

        assert_eq!(participant.prepare_count(), 1);
        assert_eq!(participant.commit_count(), 1);
        assert_eq!(participant.rollback_count(), 0);
    }

    #[tokio::test]
    async fn test_enlist_is_idempotent_per_scope() {
        let (bus, _handler) = bus_with_handler("users.created");
        let participant = Arc::new(CountingParticipant::new());
        let as_participant = Arc::clone(&participant) as Arc<dyn Participant>;

        let mut scope = UnitOfWork::new(bus);
        scope.enlist(Arc::clone(&as_participant)).unwrap();
        scope.enlist(as_participant).unwrap();
        scope.commit().await.unwrap();

        assert_eq!(participant.prepare_count(), 1);
        assert_eq!(participant.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_prepare_rolls_back_and_dispatches_nothing() {
        let (bus, handler) = bus_with_handler("users.created");
        let healthy = Arc::new(CountingParticipant::new());
        let failing = Arc::new(FailingParticipant::new());

        let mut scope = UnitOfWork::new(bus);
        scope
            .enlist(Arc::clone(&healthy) as Arc<dyn Participant>)
            .unwrap();
        scope
            .enlist(Arc::clone(&failing) as Arc<dyn Participant>)
            .unwrap();
        scope.raise(envelope("users.created")).unwrap();

        let error = scope.commit().await.unwrap_err();

        assert!(matches!(error, UnitOfWorkError::CommitFailed { .. }));
        assert_eq!(scope.state(), ScopeState::RolledBack);
        assert_eq!(handler.received_count(), 0);
        assert!(scope.pending_events().is_empty());
        assert_eq!(healthy.commit_count(), 0);
        assert_eq!(healthy.rollback_count(), 1);
        assert_eq!(failing.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_queued_events() {
        let (bus, handler) = bus_with_handler("users.created");
        let participant = Arc::new(CountingParticipant::new());

        let mut scope = UnitOfWork::new(bus);
        scope
            .enlist(Arc::clone(&participant) as Arc<dyn Participant>)
            .unwrap();
        scope.raise(envelope("users.created")).unwrap();
        scope.rollback().unwrap();

        assert_eq!(scope.state(), ScopeState::RolledBack);
        assert_eq!(handler.received_count(), 0);
        assert_eq!(participant.rollback_count(), 1);
        assert_eq!(participant.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_rollback_twice_is_a_safe_no_op() {
        let (bus, _handler) = bus_with_handler("users.created");
        let participant = Arc::new(CountingParticipant::new());

        let mut scope = UnitOfWork::new(bus);
        scope
            .enlist(Arc::clone(&participant) as Arc<dyn Participant>)
            .unwrap();
        scope.rollback().unwrap();
        scope.rollback().unwrap();

        assert_eq!(scope.state(), ScopeState::RolledBack);
        assert_eq!(participant.rollback_count(), 1);
    }

    #[tokio::test]
    async fn test_operations_on_a_terminal_scope_are_illegal() {
        let (bus, _handler) = bus_with_handler("users.created");

        let mut scope = UnitOfWork::new(Arc::clone(&bus));
        scope.commit().await.unwrap();

        assert!(matches!(
            scope.commit().await.unwrap_err(),
            UnitOfWorkError::IllegalState { operation: "commit", .. }
        ));
        assert!(matches!(
            scope.raise(envelope("users.created")).unwrap_err(),
            UnitOfWorkError::IllegalState { .. }
        ));
        assert!(matches!(
            scope
                .enlist(Arc::new(CountingParticipant::new()))
                .unwrap_err(),
            UnitOfWorkError::IllegalState { .. }
        ));
        assert!(matches!(
            scope.rollback().unwrap_err(),
            UnitOfWorkError::IllegalState { operation: "rollback", .. }
        ));
        assert_eq!(scope.state(), ScopeState::Committed);
    }

    #[tokio::test]
    async fn test_dropping_an_open_scope_rolls_back() {
        let (bus, handler) = bus_with_handler("users.created");
        let participant = Arc::new(CountingParticipant::new());

        {
            let mut scope = UnitOfWork::new(bus);
            scope
                .enlist(Arc::clone(&participant) as Arc<dyn Participant>)
                .unwrap();
            scope.raise(envelope("users.created")).unwrap();
            // Cancelled: the scope leaves without commit.
        }

        assert_eq!(handler.received_count(), 0);
        assert_eq!(participant.rollback_count(), 1);
        assert_eq!(participant.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_dropping_a_committed_scope_does_not_roll_back() {
        let (bus, _handler) = bus_with_handler("users.created");
        let participant = Arc::new(CountingParticipant::new());

        {
            let mut scope = UnitOfWork::new(bus);
            scope
                .enlist(Arc::clone(&participant) as Arc<dyn Participant>)
                .unwrap();
            scope.commit().await.unwrap();
        }

        assert_eq!(participant.rollback_count(), 0);
        assert_eq!(participant.commit_count(), 1);
    }
}
