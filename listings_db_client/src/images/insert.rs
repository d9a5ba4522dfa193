use models_listings::api::ImagePayload;
use models_listings::db::PropertyImage;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Appends an image to a property. A zero display order means "after the
/// current last image"; marking it as cover demotes the previous cover.
#[tracing::instrument(skip(db, payload))]
pub async fn add_image(
    db: &Pool<Postgres>,
    property_id: Uuid,
    payload: &ImagePayload,
) -> Result<PropertyImage> {
    let mut tx = db.begin().await?;

    let result = async {
        if payload.is_cover {
            sqlx::query("UPDATE property_images SET is_cover = FALSE WHERE property_id = $1")
                .bind(property_id)
                .execute(&mut *tx)
                .await?;
        }

        let display_order = if payload.display_order > 0 {
            payload.display_order
        } else {
            sqlx::query_scalar::<_, i32>(
                "SELECT COALESCE(MAX(display_order), -1) + 1 FROM property_images WHERE property_id = $1",
            )
            .bind(property_id)
            .fetch_one(&mut *tx)
            .await?
        };

        sqlx::query_as::<_, PropertyImage>(
            r#"
            INSERT INTO property_images (id, property_id, image_url, display_order, is_cover, alt_text)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(property_id)
        .bind(&payload.image_url)
        .bind(display_order)
        .bind(payload.is_cover)
        .bind(&payload.alt_text)
        .fetch_one(&mut *tx)
        .await
    }
    .await;

    match result {
        Ok(image) => {
            tx.commit().await?;
            Ok(image)
        }
        Err(e) => {
            tracing::error!(
                error = ?e,
                property_id = %property_id,
                "image insert failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after image insert error"
                );
            }
            Err(e.into())
        }
    }
}
