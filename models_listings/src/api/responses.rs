//! Response payloads assembled by the handlers.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db;
use crate::shared::{PlaceType, PropertyType};

/// Compact listing row returned by the list/search/nearby endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertySummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub property_type: PropertyType,
    pub place_type: PlaceType,
    pub price_per_night: i64,
    pub currency: String,
    pub bedrooms: i32,
    pub beds: i32,
    pub bathrooms: f64,
    pub max_guests: i32,
    pub average_rating: f64,
    pub total_reviews: i32,
    pub is_featured: bool,
    pub instant_book: bool,
    pub location: db::Location,
    pub cover_image: Option<String>,
}

impl PropertySummary {
    pub fn from_parts(
        property: db::Property,
        location: db::Location,
        cover_image: Option<String>,
    ) -> Self {
        Self {
            id: property.id,
            title: property.title,
            slug: property.slug,
            property_type: property.property_type,
            place_type: property.place_type,
            price_per_night: property.price_per_night,
            currency: property.currency,
            bedrooms: property.bedrooms,
            beds: property.beds,
            bathrooms: property.bathrooms,
            max_guests: property.max_guests,
            average_rating: property.average_rating,
            total_reviews: property.total_reviews,
            is_featured: property.is_featured,
            instant_book: property.instant_book,
            location,
            cover_image,
        }
    }
}

/// Summary plus the great-circle distance from the query point.
#[derive(Debug, Serialize, ToSchema)]
pub struct NearbyProperty {
    #[serde(flatten)]
    pub property: PropertySummary,
    /// Kilometers from the requested coordinates.
    pub distance_km: f64,
}

/// Full property view with all relations, returned by the detail endpoint
/// and after create/update.
#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub property: db::Property,
    pub location: db::Location,
    pub images: Vec<db::PropertyImage>,
    pub amenities: Vec<db::Amenity>,
    pub safety_features: Vec<db::SafetyFeature>,
    pub rules: Vec<db::PropertyRule>,
    pub availability: Vec<db::Availability>,
}

/// Review as returned to clients; currently a straight projection of the row.
pub type ReviewResponse = db::Review;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
