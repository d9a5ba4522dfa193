use models_listings::api::{Page, Pagination};
use models_listings::db::Review;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// One page of a property's reviews, newest first.
#[tracing::instrument(skip(db))]
pub async fn list_reviews(
    db: &Pool<Postgres>,
    property_id: Uuid,
    pagination: Pagination,
) -> Result<Page<Review>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE property_id = $1")
        .bind(property_id)
        .fetch_one(db)
        .await?;

    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT * FROM reviews
        WHERE property_id = $1
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(property_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(db)
    .await?;

    Ok(Page::new(reviews, total, pagination))
}
