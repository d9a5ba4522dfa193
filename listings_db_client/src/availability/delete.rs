use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn delete_availability(db: &Pool<Postgres>, availability_id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM availabilities WHERE id = $1")
        .bind(availability_id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ListingsDatabaseError::AvailabilityNotFound(availability_id));
    }
    Ok(())
}
