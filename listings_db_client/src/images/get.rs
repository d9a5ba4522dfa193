use models_listings::db::PropertyImage;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn get_image(db: &Pool<Postgres>, image_id: Uuid) -> Result<PropertyImage> {
    sqlx::query_as::<_, PropertyImage>("SELECT * FROM property_images WHERE id = $1")
        .bind(image_id)
        .fetch_optional(db)
        .await?
        .ok_or(ListingsDatabaseError::ImageNotFound(image_id))
}

#[tracing::instrument(skip(db))]
pub async fn count_images(db: &Pool<Postgres>, property_id: Uuid) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM property_images WHERE property_id = $1")
            .bind(property_id)
            .fetch_one(db)
            .await?;
    Ok(count)
}
