use models_listings::db::Review;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn get_review(db: &Pool<Postgres>, review_id: Uuid) -> Result<Review> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(review_id)
        .fetch_optional(db)
        .await?
        .ok_or(ListingsDatabaseError::ReviewNotFound(review_id))
}

/// True when the user already has a review on the property.
#[tracing::instrument(skip(db))]
pub async fn has_reviewed(db: &Pool<Postgres>, property_id: Uuid, user_id: Uuid) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM reviews WHERE property_id = $1 AND user_id = $2)",
    )
    .bind(property_id)
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(exists)
}
