//! Integration tests for dispatch fault isolation at the use-case level.

mod common;

use std::sync::Arc;

use docket_casework::application::use_cases;
use docket_core::handler::EventHandler;
use docket_event_bus::EventBus;
use docket_memory_store::MemoryStore;
use docket_test_support::FailingHandler;

#[tokio::test]
async fn test_failing_first_subscriber_does_not_block_the_second() {
    let bus = Arc::new(EventBus::new());
    bus.subscribe(
        "users.created",
        Arc::new(FailingHandler::new("crm-sync")) as Arc<dyn EventHandler>,
    );
    let second = common::subscribe_recorder(&bus, "users.created", "welcome-mailer");
    let store = MemoryStore::new();
    let clock = common::fixed_clock();

    // The use case still succeeds: handler failures never reach the
    // publisher.
    let user = use_cases::register_user(&bus, &store.session(), &clock, common::sample_user())
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    let received = second.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].payload(),
        &serde_json::json!({ "id": user.id })
    );
}

#[tokio::test]
async fn test_each_commit_dispatches_its_own_events() {
    let bus = Arc::new(EventBus::new());
    let created = common::subscribe_recorder(&bus, "users.created", "audit");
    let removed = common::subscribe_recorder(&bus, "users.removed", "audit");
    let store = MemoryStore::new();
    let clock = common::fixed_clock();

    let user = use_cases::register_user(&bus, &store.session(), &clock, common::sample_user())
        .await
        .unwrap();
    use_cases::remove_user(&bus, &store.session(), &clock, user.id)
        .await
        .unwrap();

    assert_eq!(created.received_count(), 1);
    assert_eq!(removed.received_count(), 1);
    assert!(store.is_empty());
}
