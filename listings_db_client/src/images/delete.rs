use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Removes an image. When the cover is deleted the first remaining image by
/// display order takes over as cover.
#[tracing::instrument(skip(db))]
pub async fn delete_image(db: &Pool<Postgres>, image_id: Uuid) -> Result<()> {
    let mut tx = db.begin().await?;

    let result = async {
        let deleted: Option<(Uuid, bool)> = sqlx::query_as(
            "DELETE FROM property_images WHERE id = $1 RETURNING property_id, is_cover",
        )
        .bind(image_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((property_id, was_cover)) = deleted else {
            return Ok(false);
        };

        if was_cover {
            sqlx::query(
                r#"
                UPDATE property_images SET is_cover = TRUE
                WHERE id = (
                    SELECT id FROM property_images
                    WHERE property_id = $1
                    ORDER BY display_order ASC
                    LIMIT 1
                )
                "#,
            )
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        }

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
                    "failed to rollback transaction after missing image delete"
                );
            }
            Err(ListingsDatabaseError::ImageNotFound(image_id))
        }
        Err(e) => {
            tracing::error!(
                error = ?e,
                image_id = %image_id,
                "image delete failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after image delete error"
                );
            }
            Err(e.into())
        }
    }
}
