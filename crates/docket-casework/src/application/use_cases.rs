//! Use cases for the casework context.
//!
//! Each use case opens a Unit-of-Work scope, stages mutations through
//! the enlisted repository sessions, raises the matching domain event,
//! and commits. On every failure path the scope rolls back and no event
//! reaches a subscriber.

use std::sync::Arc;

use docket_core::clock::Clock;
use docket_core::error::DomainError;
use docket_core::event::EventEnvelope;
use docket_core::repository::{Participant, Repository};
use docket_event_bus::EventBus;
use docket_unit_of_work::UnitOfWork;
use uuid::Uuid;

use crate::domain::entities::{Buffet, CaseRecord, CaseStatus, User};
use crate::domain::events::{
    BuffetRegistered, CaseRecordClosed, CaseRecordOpened, UserCreated, UserRemoved,
};
use crate::error::UseCaseError;

/// Registers a new user and announces `users.created`.
///
/// # Errors
///
/// Propagates repository failures unchanged; returns the commit failure
/// if persistence fails, in which case nothing is visible and no event
/// is dispatched.
pub async fn register_user<R>(
    bus: &Arc<EventBus>,
    users: &Arc<R>,
    clock: &dyn Clock,
    user: User,
) -> Result<User, UseCaseError>
where
    R: Repository<User> + Participant + 'static,
{
    let mut scope = UnitOfWork::new(Arc::clone(bus));
    scope.enlist(Arc::clone(users) as Arc<dyn Participant>)?;

    let user = users.add(user).await?;
    scope.raise(EventEnvelope::new(
        &UserCreated { user_id: user.id },
        clock,
    ))?;
    scope.commit().await?;

    Ok(user)
}

/// Removes a user and announces `users.removed`.
///
/// # Errors
///
/// Returns `EntityNotFound` if no such user exists; the scope rolls back
/// without dispatching anything.
pub async fn remove_user<R>(
    bus: &Arc<EventBus>,
    users: &Arc<R>,
    clock: &dyn Clock,
    user_id: Uuid,
) -> Result<(), UseCaseError>
where
    R: Repository<User> + Participant + 'static,
{
    let mut scope = UnitOfWork::new(Arc::clone(bus));
    scope.enlist(Arc::clone(users) as Arc<dyn Participant>)?;

    if !users.delete(user_id).await? {
        return Err(DomainError::EntityNotFound(user_id).into());
    }
    scope.raise(EventEnvelope::new(&UserRemoved { user_id }, clock))?;
    scope.commit().await?;

    Ok(())
}

/// Registers a law firm owned by an existing user and announces
/// `buffets.registered`.
///
/// # Errors
///
/// Returns a validation failure if the owner does not exist; propagates
/// repository and commit failures unchanged.
pub async fn register_buffet<U, B>(
    bus: &Arc<EventBus>,
    users: &Arc<U>,
    buffets: &Arc<B>,
    clock: &dyn Clock,
    buffet: Buffet,
) -> Result<Buffet, UseCaseError>
where
    U: Repository<User>,
    B: Repository<Buffet> + Participant + 'static,
{
    if users.get_by_id(buffet.owner_user_id).await?.is_none() {
        return Err(DomainError::Validation(format!(
            "owner user {} does not exist",
            buffet.owner_user_id
        ))
        .into());
    }

    let mut scope = UnitOfWork::new(Arc::clone(bus));
    scope.enlist(Arc::clone(buffets) as Arc<dyn Participant>)?;

    let buffet = buffets.add(buffet).await?;
    scope.raise(EventEnvelope::new(
        &BuffetRegistered {
            buffet_id: buffet.id,
            owner_user_id: buffet.owner_user_id,
        },
        clock,
    ))?;
    scope.commit().await?;

    Ok(buffet)
}

/// Opens a vehicle-investigation case record for an existing buffet and
/// announces `case_records.opened`. The record always starts `Open`.
///
/// # Errors
///
/// Returns `EntityNotFound` if the buffet does not exist; propagates
/// repository and commit failures unchanged.
pub async fn open_case_record<B, C>(
    bus: &Arc<EventBus>,
    buffets: &Arc<B>,
    cases: &Arc<C>,
    clock: &dyn Clock,
    case: CaseRecord,
) -> Result<CaseRecord, UseCaseError>
where
    B: Repository<Buffet>,
    C: Repository<CaseRecord> + Participant + 'static,
{
    if buffets.get_by_id(case.buffet_id).await?.is_none() {
        return Err(DomainError::EntityNotFound(case.buffet_id).into());
    }

    let mut scope = UnitOfWork::new(Arc::clone(bus));
    scope.enlist(Arc::clone(cases) as Arc<dyn Participant>)?;

    let case = cases
        .add(CaseRecord {
            status: CaseStatus::Open,
            ..case
        })
        .await?;
    scope.raise(EventEnvelope::new(
        &CaseRecordOpened {
            case_record_id: case.id,
            buffet_id: case.buffet_id,
            plate_number: case.plate_number.clone(),
        },
        clock,
    ))?;
    scope.commit().await?;

    Ok(case)
}

/// Closes an open case record and announces `case_records.closed`.
///
/// # Errors
///
/// Returns `EntityNotFound` if the record does not exist and a
/// validation failure if it is already closed; propagates repository and
/// commit failures unchanged.
pub async fn close_case_record<C>(
    bus: &Arc<EventBus>,
    cases: &Arc<C>,
    clock: &dyn Clock,
    case_record_id: Uuid,
) -> Result<CaseRecord, UseCaseError>
where
    C: Repository<CaseRecord> + Participant + 'static,
{
    let Some(case) = cases.get_by_id(case_record_id).await? else {
        return Err(DomainError::EntityNotFound(case_record_id).into());
    };
    if case.status == CaseStatus::Closed {
        return Err(DomainError::Validation(format!(
            "case record {case_record_id} is already closed"
        ))
        .into());
    }

    let mut scope = UnitOfWork::new(Arc::clone(bus));
    scope.enlist(Arc::clone(cases) as Arc<dyn Participant>)?;

    let closed = cases
        .update(CaseRecord {
            status: CaseStatus::Closed,
            ..case
        })
        .await?;
    scope.raise(EventEnvelope::new(&CaseRecordClosed { case_record_id }, clock))?;
    scope.commit().await?;

    Ok(closed)
}
