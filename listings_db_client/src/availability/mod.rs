//! Availability window operations.

pub mod delete;
pub mod get;
pub mod insert;
