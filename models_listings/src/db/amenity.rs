use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::AmenityCategory;

/// Catalog amenity, shared across properties through `property_amenities`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub category: AmenityCategory,
    pub icon: Option<String>,
}

/// Catalog safety feature, shared across properties through
/// `property_safety_features`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SafetyFeature {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}
