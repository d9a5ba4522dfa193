use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;
use crate::reviews::ratings::refresh_property_rating;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Deletes a review and refreshes the property's aggregate rating in the
/// same transaction.
#[tracing::instrument(skip(db))]
pub async fn delete_review(db: &Pool<Postgres>, review_id: Uuid) -> Result<()> {
    let mut tx = db.begin().await?;

    let result = async {
        let property_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM reviews WHERE id = $1 RETURNING property_id")
                .bind(review_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(property_id) = property_id else {
            return Ok(false);
        };

        refresh_property_rating(&mut tx, property_id).await?;
        Ok::<bool, sqlx::Error>(true)
    }
    .await;

    match result {
        Ok(true) => {
            tx.commit().await?;
            Ok(())
        }
        Ok(false) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after missing review delete"
                );
            }
            Err(ListingsDatabaseError::ReviewNotFound(review_id))
        }
        Err(e) => {
            tracing::error!(
                error = ?e,
                review_id = %review_id,
                "review delete failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after review delete error"
                );
            }
            Err(e.into())
        }
    }
}
