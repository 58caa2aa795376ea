//! Shared helpers for casework integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::TimeZone;
use docket_casework::domain::entities::{Buffet, CaseRecord, CaseStatus, User};
use docket_core::handler::EventHandler;
use docket_event_bus::EventBus;
use docket_test_support::{FixedClock, RecordingHandler};
use uuid::Uuid;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> FixedClock {
    FixedClock(chrono::Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap())
}

/// Subscribes a fresh recording handler for `event_type` and returns it.
pub fn subscribe_recorder(
    bus: &EventBus,
    event_type: &str,
    name: &str,
) -> Arc<RecordingHandler> {
    let handler = Arc::new(RecordingHandler::new(name));
    bus.subscribe(event_type, Arc::clone(&handler) as Arc<dyn EventHandler>);
    handler
}

pub fn sample_user() -> User {
    User {
        id: Uuid::new_v4(),
        full_name: "Ana Souza".into(),
        email: "ana.souza@example.com".into(),
        tax_id: "111.222.333-44".into(),
    }
}

pub fn sample_buffet(owner_user_id: Uuid) -> Buffet {
    Buffet {
        id: Uuid::new_v4(),
        legal_name: "Souza & Prado Advogados".into(),
        tax_id: "12.345.678/0001-90".into(),
        owner_user_id,
    }
}

pub fn sample_case(buffet_id: Uuid) -> CaseRecord {
    CaseRecord {
        id: Uuid::new_v4(),
        buffet_id,
        plate_number: "BRA2E19".into(),
        status: CaseStatus::Open,
    }
}
