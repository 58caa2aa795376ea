//! Shared test mocks and utilities for the Docket backend.

mod clock;
mod event;
mod handler;
mod participant;
mod tracing;

pub use clock::FixedClock;
pub use event::StubEvent;
pub use handler::{FailingHandler, Journal, RecordingHandler, SlowHandler};
pub use participant::{CountingParticipant, FailingParticipant};
pub use tracing::init_test_tracing;
