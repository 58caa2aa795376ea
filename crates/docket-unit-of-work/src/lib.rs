//! Docket — Unit-of-Work transaction boundary.
//!
//! A scope groups repository mutations so they persist or roll back
//! together, and correlates domain-event publication with a successful
//! commit: subscribers never observe an event whose underlying state
//! change did not durably persist.

mod error;
mod scope;

pub use error::UnitOfWorkError;
pub use scope::{ScopeState, UnitOfWork};
