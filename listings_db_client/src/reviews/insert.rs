use models_listings::api::CreateReviewRequest;
use models_listings::db::Review;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::{is_unique_violation, ListingsDatabaseError};
use crate::reviews::ratings::refresh_property_rating;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Creates a review and refreshes the property's aggregate rating in the
/// same transaction. A second review by the same user is rejected.
#[tracing::instrument(skip(db, request))]
pub async fn create_review(
    db: &Pool<Postgres>,
    property_id: Uuid,
    user_id: Uuid,
    request: &CreateReviewRequest,
) -> Result<Review> {
    let mut tx = db.begin().await?;

    let inserted = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (
            id, property_id, user_id, rating, comment,
            cleanliness_rating, accuracy_rating, communication_rating,
            location_rating, check_in_rating, value_rating, is_verified_stay
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(property_id)
    .bind(user_id)
    .bind(request.rating)
    .bind(&request.comment)
    .bind(request.cleanliness_rating)
    .bind(request.accuracy_rating)
    .bind(request.communication_rating)
    .bind(request.location_rating)
    .bind(request.check_in_rating)
    .bind(request.value_rating)
    .bind(request.is_verified_stay)
    .fetch_one(&mut *tx)
    .await;

    let review = match inserted {
        Ok(review) => review,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after review insert error"
                );
            }
            if is_unique_violation(&e) {
                return Err(ListingsDatabaseError::DuplicateReview {
                    property_id,
                    user_id,
                });
            }
            tracing::error!(error = ?e, property_id = %property_id, "review insert failed");
            return Err(e.into());
        }
    };

    if let Err(e) = refresh_property_rating(&mut tx, property_id).await {
        tracing::error!(
            error = ?e,
            property_id = %property_id,
            "rating refresh failed, rolling back transaction"
        );
        if let Err(rollback_err) = tx.rollback().await {
            tracing::error!(
                error = ?rollback_err,
                "failed to rollback transaction after rating refresh error"
            );
        }
        return Err(e.into());
    }

    if let Err(e) = tx.commit().await {
        tracing::error!(error = ?e, "failed to commit review create transaction");
        return Err(e.into());
    }

    Ok(review)
}
