//! Event handler contract.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::event::EventEnvelope;

/// A unit of logic registered to react to events of one type.
///
/// The contract is uniformly async: a handler that performs no I/O simply
/// completes immediately. Handlers must not assume any delivery ordering
/// relative to other event types.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Short name used when reporting failures.
    fn name(&self) -> &str;

    /// Reacts to one event of the subscribed type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` on failure. The bus isolates the failure and
    /// reports it; it never reaches the publisher.
    async fn handle(&self, event: &EventEnvelope) -> Result<(), DomainError>;
}
