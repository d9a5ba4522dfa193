use models_listings::api::UpdateReviewRequest;
use models_listings::db::Review;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;
use crate::reviews::ratings::refresh_property_rating;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Partial review update followed by a rating refresh in the same
/// transaction.
#[tracing::instrument(skip(db, request))]
pub async fn update_review(
    db: &Pool<Postgres>,
    review_id: Uuid,
    request: &UpdateReviewRequest,
) -> Result<Review> {
    let mut tx = db.begin().await?;

    let result = async {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = COALESCE($2, rating),
                comment = COALESCE($3, comment),
                cleanliness_rating = COALESCE($4, cleanliness_rating),
                accuracy_rating = COALESCE($5, accuracy_rating),
                communication_rating = COALESCE($6, communication_rating),
                location_rating = COALESCE($7, location_rating),
                check_in_rating = COALESCE($8, check_in_rating),
                value_rating = COALESCE($9, value_rating),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(review_id)
        .bind(request.rating)
        .bind(&request.comment)
        .bind(request.cleanliness_rating)
        .bind(request.accuracy_rating)
        .bind(request.communication_rating)
        .bind(request.location_rating)
        .bind(request.check_in_rating)
        .bind(request.value_rating)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(review) = review else {
            return Ok(None);
        };

        refresh_property_rating(&mut tx, review.property_id).await?;
        Ok::<Option<Review>, sqlx::Error>(Some(review))
    }
    .await;

    match result {
        Ok(Some(review)) => {
            tx.commit().await?;
            Ok(review)
        }
        Ok(None) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after missing review update"
                );
            }
            Err(ListingsDatabaseError::ReviewNotFound(review_id))
        }
        Err(e) => {
            tracing::error!(
                error = ?e,
                review_id = %review_id,
                "review update failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after review update error"
                );
            }
            Err(e.into())
        }
    }
}

/// Increments the helpful counter. Not rating-bearing, so no refresh.
#[tracing::instrument(skip(db))]
pub async fn mark_helpful(db: &Pool<Postgres>, review_id: Uuid) -> Result<Review> {
    sqlx::query_as::<_, Review>(
        r#"
        UPDATE reviews
        SET helpful_count = helpful_count + 1, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(review_id)
    .fetch_optional(db)
    .await?
    .ok_or(ListingsDatabaseError::ReviewNotFound(review_id))
}
