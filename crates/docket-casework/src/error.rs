//! Casework error types.

use docket_core::error::DomainError;
use docket_unit_of_work::UnitOfWorkError;
use thiserror::Error;

/// Failures surfaced by casework use cases.
///
/// Collaborator failures (validation included) pass through unchanged;
/// commit failures carry the participant error that aborted the scope.
#[derive(Debug, Error)]
pub enum UseCaseError {
    /// A repository or collaborator failure, passed through unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A scope operation failed.
    #[error(transparent)]
    UnitOfWork(#[from] UnitOfWorkError),
}
