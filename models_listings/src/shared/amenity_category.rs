use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalog grouping for amenities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "amenity_category", rename_all = "snake_case")]
pub enum AmenityCategory {
    Basic,
    Safety,
    Accessibility,
    Kitchen,
    Entertainment,
}
