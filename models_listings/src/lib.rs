//! Shared models for the rental listings service.
//!
//! Split the same way the service consumes them: `shared/` holds the enums
//! used by both the API and the database layer, `db/` holds the sqlx row
//! types, and `api/` holds request/response/query-parameter types together
//! with their validation errors.

pub mod api;
pub mod db;
pub mod geo;
pub mod shared;

pub use shared::{
    AmenityCategory, PlaceType, PropertyType, RuleType, SortBy, VerificationStatus,
};
