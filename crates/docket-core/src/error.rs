//! Error types shared across the coordination core.

use thiserror::Error;
use uuid::Uuid;

/// Failures raised by repositories, participants, and event handlers.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No entity exists under the given identifier.
    #[error("entity not found: {0}")]
    EntityNotFound(Uuid),

    /// A staged mutation conflicts with already-persisted state.
    #[error("conflict on entity {entity_id}: {reason}")]
    Conflict {
        /// The entity the conflict was detected on.
        entity_id: Uuid,
        /// What the staged mutation collided with.
        reason: String,
    },

    /// A validation failure raised by a collaborator; the core passes it
    /// through unchanged.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
