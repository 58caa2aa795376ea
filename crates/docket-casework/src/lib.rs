//! Docket — casework bounded context.
//!
//! Users, law-firm buffets, and the vehicle-investigation case records
//! they own: entities, domain events, and the application use cases that
//! drive the Unit-of-Work core. Transport, persistence mapping, and
//! value-format validation live outside this crate.

pub mod application;
pub mod domain;
pub mod error;
