//! Docket — in-process domain event bus.
//!
//! Decouples producers of domain facts from their consumers: handlers are
//! registered per event type at process initialization, and published
//! events fan out to every registered handler in subscription order, with
//! each handler failure isolated from the rest of the dispatch.

mod bus;

pub use bus::{DispatchSummary, EventBus};
