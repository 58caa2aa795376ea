//! Repository and transaction-participant contracts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// An aggregate with a stable identity.
pub trait Entity: Clone + Send + Sync {
    /// Returns the entity identifier.
    fn id(&self) -> Uuid;
}

/// Generic per-aggregate CRUD contract consumed by the coordination core.
///
/// The core does not prescribe the storage behind an implementation; it
/// only requires that mutations enlisted in a Unit-of-Work scope commit
/// or roll back together.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Loads the entity with the given identifier, if present.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, DomainError>;

    /// Lists entities in stable order, skipping `offset` rows and
    /// returning at most `limit`.
    async fn list(&self, offset: usize, limit: usize) -> Result<Vec<T>, DomainError>;

    /// Stages a new entity and returns it as it will be persisted.
    async fn add(&self, entity: T) -> Result<T, DomainError>;

    /// Stages an update to an existing entity.
    async fn update(&self, entity: T) -> Result<T, DomainError>;

    /// Stages a deletion; returns whether the entity currently exists.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// A transactional resource enlisted in a Unit-of-Work scope.
///
/// Commit is two-phase: `prepare` performs all fallible durability work,
/// and `commit` is the infallible visibility flip, invoked only once
/// every participant of the scope has prepared successfully. This keeps
/// a multi-participant scope free of observable partial commits.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Durably stages this participant's mutations.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the staged mutations cannot be persisted.
    /// The owning scope then rolls back every participant and dispatches
    /// nothing.
    async fn prepare(&self) -> Result<(), DomainError>;

    /// Makes prepared mutations visible. Must not fail after a
    /// successful `prepare`.
    fn commit(&self);

    /// Discards staged mutations. Safe to call in any state.
    fn rollback(&self);
}
