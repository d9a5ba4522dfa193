use models_listings::db::Availability;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn get_availability(
    db: &Pool<Postgres>,
    availability_id: Uuid,
) -> Result<Availability> {
    sqlx::query_as::<_, Availability>("SELECT * FROM availabilities WHERE id = $1")
        .bind(availability_id)
        .fetch_optional(db)
        .await?
        .ok_or(ListingsDatabaseError::AvailabilityNotFound(availability_id))
}

#[tracing::instrument(skip(db))]
pub async fn list_availability(
    db: &Pool<Postgres>,
    property_id: Uuid,
) -> Result<Vec<Availability>> {
    let windows = sqlx::query_as::<_, Availability>(
        "SELECT * FROM availabilities WHERE property_id = $1 ORDER BY start_date ASC",
    )
    .bind(property_id)
    .fetch_all(db)
    .await?;
    Ok(windows)
}
