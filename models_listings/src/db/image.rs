use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A photo attached to a property, ordered by `display_order` (ascending,
/// ties broken arbitrarily); at most one image per property is the cover.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PropertyImage {
    pub id: Uuid,
    pub property_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
    pub is_cover: bool,
    pub alt_text: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
