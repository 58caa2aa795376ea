//! Read-only queries for the casework context.
//!
//! Queries go straight to a repository; they neither open a scope nor
//! raise events.

use docket_core::error::DomainError;
use docket_core::repository::Repository;
use uuid::Uuid;

use crate::domain::entities::{CaseRecord, User};
use crate::error::UseCaseError;

/// Retrieves a user by identifier.
///
/// # Errors
///
/// Returns `EntityNotFound` if no such user exists.
pub async fn get_user_by_id<R>(users: &R, user_id: Uuid) -> Result<User, UseCaseError>
where
    R: Repository<User>,
{
    users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::EntityNotFound(user_id).into())
}

/// Lists users in stable order.
///
/// # Errors
///
/// Propagates repository failures unchanged.
pub async fn list_users<R>(users: &R, offset: usize, limit: usize) -> Result<Vec<User>, UseCaseError>
where
    R: Repository<User>,
{
    Ok(users.list(offset, limit).await?)
}

/// Lists case records in stable order.
///
/// # Errors
///
/// Propagates repository failures unchanged.
pub async fn list_case_records<R>(
    cases: &R,
    offset: usize,
    limit: usize,
) -> Result<Vec<CaseRecord>, UseCaseError>
where
    R: Repository<CaseRecord>,
{
    Ok(cases.list(offset, limit).await?)
}
