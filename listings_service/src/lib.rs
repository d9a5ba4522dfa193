//! Listings service: CRUD and search over rental property listings, with
//! reviews and aggregate-rating upkeep. Authentication is delegated to the
//! external auth service.

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod telemetry;
