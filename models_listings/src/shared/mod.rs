//! Enums shared between the API surface and the database schema.

mod amenity_category;
mod property_kind;
mod rule_type;
mod sort;
mod verification;

pub use amenity_category::AmenityCategory;
pub use property_kind::{PlaceType, PropertyType};
pub use rule_type::RuleType;
pub use sort::SortBy;
pub use verification::VerificationStatus;
