//! Property deletion. Child rows go via ON DELETE CASCADE; the owned
//! location row is removed explicitly.

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn delete_property(db: &Pool<Postgres>, property_id: Uuid) -> Result<()> {
    let mut tx = db.begin().await?;

    let location_id: Option<Uuid> =
        sqlx::query_scalar("DELETE FROM properties WHERE id = $1 RETURNING location_id")
            .bind(property_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some(location_id) = location_id else {
        if let Err(rollback_err) = tx.rollback().await {
            tracing::error!(
                error = ?rollback_err,
                "failed to rollback transaction after missing property delete"
            );
        }
        return Err(ListingsDatabaseError::PropertyNotFound(property_id));
    };

    if let Err(e) = sqlx::query("DELETE FROM locations WHERE id = $1")
        .bind(location_id)
        .execute(&mut *tx)
        .await
    {
        tracing::error!(
            error = ?e,
            property_id = %property_id,
            "location delete failed, rolling back transaction"
        );
        if let Err(rollback_err) = tx.rollback().await {
            tracing::error!(
                error = ?rollback_err,
                "failed to rollback transaction after location delete error"
            );
        }
        return Err(e.into());
    }

    if let Err(e) = tx.commit().await {
        tracing::error!(error = ?e, "failed to commit property delete transaction");
        return Err(e.into());
    }

    Ok(())
}
