//! Single-property reads.

use models_listings::api::PropertyDetail;
use models_listings::db::{
    Amenity, Availability, Location, Property, PropertyImage, PropertyRule, SafetyFeature,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Fetches the bare property row.
#[tracing::instrument(skip(db))]
pub async fn get_property(db: &Pool<Postgres>, property_id: Uuid) -> Result<Property> {
    sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
        .bind(property_id)
        .fetch_optional(db)
        .await?
        .ok_or(ListingsDatabaseError::PropertyNotFound(property_id))
}

/// Fetches the property with all relations for the detail view.
#[tracing::instrument(skip(db))]
pub async fn get_property_detail(db: &Pool<Postgres>, property_id: Uuid) -> Result<PropertyDetail> {
    let property = get_property(db, property_id).await?;

    let location = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = $1")
        .bind(property.location_id)
        .fetch_one(db)
        .await?;

    let images = sqlx::query_as::<_, PropertyImage>(
        "SELECT * FROM property_images WHERE property_id = $1 ORDER BY display_order ASC",
    )
    .bind(property_id)
    .fetch_all(db)
    .await?;

    let amenities = sqlx::query_as::<_, Amenity>(
        r#"
        SELECT a.*
        FROM amenities a
        JOIN property_amenities pa ON pa.amenity_id = a.id
        WHERE pa.property_id = $1
        ORDER BY a.category ASC, a.name ASC
        "#,
    )
    .bind(property_id)
    .fetch_all(db)
    .await?;

    let safety_features = sqlx::query_as::<_, SafetyFeature>(
        r#"
        SELECT s.*
        FROM safety_features s
        JOIN property_safety_features ps ON ps.safety_feature_id = s.id
        WHERE ps.property_id = $1
        ORDER BY s.name ASC
        "#,
    )
    .bind(property_id)
    .fetch_all(db)
    .await?;

    let rules = sqlx::query_as::<_, PropertyRule>(
        "SELECT * FROM property_rules WHERE property_id = $1 ORDER BY rule_type ASC, id ASC",
    )
    .bind(property_id)
    .fetch_all(db)
    .await?;

    let availability = sqlx::query_as::<_, Availability>(
        "SELECT * FROM availabilities WHERE property_id = $1 ORDER BY start_date ASC",
    )
    .bind(property_id)
    .fetch_all(db)
    .await?;

    Ok(PropertyDetail {
        property,
        location,
        images,
        amenities,
        safety_features,
        rules,
        availability,
    })
}

/// True when a property already uses the slug.
#[tracing::instrument(skip(db))]
pub async fn slug_exists(db: &Pool<Postgres>, slug: &str) -> Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM properties WHERE slug = $1)")
            .bind(slug)
            .fetch_one(db)
            .await?;
    Ok(exists)
}
