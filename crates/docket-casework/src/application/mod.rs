//! Application layer for the casework context.

pub mod queries;
pub mod use_cases;
