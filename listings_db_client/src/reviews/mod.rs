//! Review operations. Every mutation recomputes the property's aggregate
//! rating inside the same transaction, so `average_rating` and
//! `total_reviews` never drift from the review rows.

pub mod delete;
pub mod get;
pub mod insert;
pub mod list;
pub(crate) mod ratings;
pub mod update;
