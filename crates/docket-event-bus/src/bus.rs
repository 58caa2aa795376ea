//! Handler registry and dispatch loop.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use docket_core::error::DomainError;
use docket_core::event::EventEnvelope;
use docket_core::handler::EventHandler;

/// Outcome of one `publish` call.
///
/// Handler failures are reported through `tracing` and counted here;
/// they never propagate to the publisher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Handlers that completed successfully.
    pub delivered: usize,
    /// Handlers that failed or timed out.
    pub failed: usize,
}

/// Registry mapping event type tags to ordered handler lists.
///
/// The registry is shared process-wide; registration is expected during
/// initialization, but dispatch lookups stay safe against concurrent
/// `subscribe` calls. There is no ambient global: construct an instance
/// and share it by `Arc`.
pub struct EventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    handler_timeout: Option<Duration>,
}

impl EventBus {
    /// Creates a bus with no handler timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            handler_timeout: None,
        }
    }

    /// Creates a bus that treats any handler running longer than
    /// `timeout` as failed. The timed-out handler is isolated like any
    /// other failure; remaining handlers still run.
    #[must_use]
    pub fn with_handler_timeout(timeout: Duration) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            handler_timeout: Some(timeout),
        }
    }

    /// Registers `handler` for `event_type`.
    ///
    /// Never fails. Duplicate registrations are kept and each copy is
    /// invoked on dispatch; registration order determines dispatch order
    /// for the type.
    pub fn subscribe(&self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_type = event_type.into();
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        handlers.entry(event_type).or_default().push(handler);
    }

    /// Dispatches `event` to every handler registered for its type, in
    /// subscription order, waiting for each handler to finish before
    /// invoking the next.
    ///
    /// A handler that fails or times out is logged and counted, and the
    /// remaining handlers still run. With no handler registered for the
    /// type, publishing is a successful no-op.
    pub async fn publish(&self, event: &EventEnvelope) -> DispatchSummary {
        let registered: Vec<Arc<dyn EventHandler>> = {
            let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            handlers.get(event.event_type()).cloned().unwrap_or_default()
        };

        if registered.is_empty() {
            tracing::debug!(
                event_type = event.event_type(),
                "no handlers registered; publish is a no-op"
            );
            return DispatchSummary::default();
        }

        let mut summary = DispatchSummary::default();
        for handler in registered {
            let outcome = self.invoke(handler.as_ref(), event).await;
            match outcome {
                Ok(()) => summary.delivered += 1,
                Err(error) => {
                    summary.failed += 1;
                    tracing::warn!(
                        handler = handler.name(),
                        event_type = event.event_type(),
                        event_id = %event.event_id(),
                        %error,
                        "event handler failed; continuing dispatch"
                    );
                }
            }
        }
        summary
    }

    async fn invoke(
        &self,
        handler: &dyn EventHandler,
        event: &EventEnvelope,
    ) -> Result<(), DomainError> {
        match self.handler_timeout {
            Some(limit) => match tokio::time::timeout(limit, handler.handle(event)).await {
                Ok(result) => result,
                Err(_) => {
                    let millis = limit.as_millis();
                    Err(DomainError::Infrastructure(format!(
                        "handler timed out after {millis}ms"
                    )))
                }
            },
            None => handler.handle(event).await,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
