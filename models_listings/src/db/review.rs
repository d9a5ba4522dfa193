use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A guest review. At most one exists per (property, user) pair, enforced by
/// a unique constraint and checked again at the service boundary.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub property_id: Uuid,
    /// Reference into the external auth service's user space.
    pub user_id: Uuid,

    /// Overall rating, 1-5.
    pub rating: i16,
    pub comment: Option<String>,

    pub cleanliness_rating: Option<i16>,
    pub accuracy_rating: Option<i16>,
    pub communication_rating: Option<i16>,
    pub location_rating: Option<i16>,
    pub check_in_rating: Option<i16>,
    pub value_rating: Option<i16>,

    pub helpful_count: i32,
    pub reported: bool,
    pub is_verified_stay: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
