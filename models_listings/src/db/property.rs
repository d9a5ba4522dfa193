use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::{PlaceType, PropertyType, VerificationStatus};

/// A rentable unit. `average_rating` and `total_reviews` are derived from the
/// reviews table and are only ever written by the rating recompute, never by
/// request payloads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub property_type: PropertyType,
    pub place_type: PlaceType,

    pub bedrooms: i32,
    pub beds: i32,
    pub bathrooms: f64,
    pub max_guests: i32,
    pub max_adults: i32,
    pub max_children: i32,
    pub max_infants: i32,
    pub pets_allowed: bool,

    /// Nightly price in minor currency units (cents).
    pub price_per_night: i64,
    pub currency: String,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    /// Percentage discounts, 0-100.
    pub weekly_discount: i32,
    pub monthly_discount: i32,

    pub location_id: Uuid,

    pub is_active: bool,
    pub is_featured: bool,
    pub verification_status: VerificationStatus,
    pub instant_book: bool,

    pub average_rating: f64,
    pub total_reviews: i32,

    pub host_id: Uuid,
    pub host_name: String,
    pub host_email: String,
    pub host_avatar: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}
