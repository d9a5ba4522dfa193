//! Reads of the amenity and safety-feature catalogs.

use models_listings::db::{Amenity, SafetyFeature};
use sqlx::{Pool, Postgres};

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db))]
pub async fn list_amenities(db: &Pool<Postgres>) -> Result<Vec<Amenity>> {
    let amenities =
        sqlx::query_as::<_, Amenity>("SELECT * FROM amenities ORDER BY category ASC, name ASC")
            .fetch_all(db)
            .await?;
    Ok(amenities)
}

#[tracing::instrument(skip(db))]
pub async fn list_safety_features(db: &Pool<Postgres>) -> Result<Vec<SafetyFeature>> {
    let features =
        sqlx::query_as::<_, SafetyFeature>("SELECT * FROM safety_features ORDER BY name ASC")
            .fetch_all(db)
            .await?;
    Ok(features)
}
