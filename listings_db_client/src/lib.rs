//! Listings Database Client
//!
//! This crate provides database access functions for the listings service,
//! handling properties, their images and availability windows, reviews with
//! aggregate rating upkeep, and the amenity/safety-feature reference data.

pub mod availability;
pub mod error;
pub mod images;
pub mod properties;
pub mod reference;
pub mod reviews;
