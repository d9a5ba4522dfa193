//! Database row types, one per table. These are what sqlx decodes into and
//! what the db client hands back to the service.

mod amenity;
mod availability;
mod image;
mod location;
mod property;
mod review;
mod rule;

pub use amenity::{Amenity, SafetyFeature};
pub use availability::Availability;
pub use image::PropertyImage;
pub use location::Location;
pub use property::Property;
pub use review::Review;
pub use rule::PropertyRule;
