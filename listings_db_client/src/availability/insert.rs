use models_listings::api::AvailabilityRequest;
use models_listings::db::Availability;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db, request))]
pub async fn add_availability(
    db: &Pool<Postgres>,
    property_id: Uuid,
    request: &AvailabilityRequest,
) -> Result<Availability> {
    let window = sqlx::query_as::<_, Availability>(
        r#"
        INSERT INTO availabilities (id, property_id, start_date, end_date, is_available, price_override)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(property_id)
    .bind(request.start_date)
    .bind(request.end_date)
    .bind(request.is_available)
    .bind(request.price_override)
    .fetch_one(db)
    .await?;

    Ok(window)
}
