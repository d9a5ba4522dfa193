use models_listings::api::UpdateImageRequest;
use models_listings::db::PropertyImage;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Partial image update. Promoting an image to cover demotes its siblings.
#[tracing::instrument(skip(db, request))]
pub async fn update_image(
    db: &Pool<Postgres>,
    image_id: Uuid,
    request: &UpdateImageRequest,
) -> Result<PropertyImage> {
    let mut tx = db.begin().await?;

    let result = async {
        if request.is_cover == Some(true) {
            sqlx::query(
                r#"
                UPDATE property_images SET is_cover = FALSE
                WHERE property_id = (SELECT property_id FROM property_images WHERE id = $1)
                "#,
            )
            .bind(image_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query_as::<_, PropertyImage>(
            r#"
            UPDATE property_images
            SET display_order = COALESCE($2, display_order),
                is_cover = COALESCE($3, is_cover),
                alt_text = COALESCE($4, alt_text)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(image_id)
        .bind(request.display_order)
        .bind(request.is_cover)
        .bind(&request.alt_text)
        .fetch_optional(&mut *tx)
        .await
    }
    .await;

    match result {
        Ok(Some(image)) => {
            tx.commit().await?;
            Ok(image)
        }
        Ok(None) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after missing image update"
                );
            }
            Err(ListingsDatabaseError::ImageNotFound(image_id))
        }
        Err(e) => {
            tracing::error!(
                error = ?e,
                image_id = %image_id,
                "image update failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after image update error"
                );
            }
            Err(e.into())
        }
    }
}
