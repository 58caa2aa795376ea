//! Unit-of-Work error types.

use docket_core::error::DomainError;
use thiserror::Error;

use crate::scope::ScopeState;

/// Failures surfaced by scope operations.
#[derive(Debug, Error)]
pub enum UnitOfWorkError {
    /// An operation was attempted against a scope already in a terminal
    /// state.
    #[error("cannot {operation} a {state} scope")]
    IllegalState {
        /// The operation that was refused.
        operation: &'static str,
        /// The scope state at the time of the attempt.
        state: ScopeState,
    },

    /// Persistence of participant mutations failed. The scope has rolled
    /// back and no events were dispatched.
    #[error("commit failed: {source}")]
    CommitFailed {
        /// The participant failure that aborted the commit.
        #[source]
        source: DomainError,
    },
}
