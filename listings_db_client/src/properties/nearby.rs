//! Proximity search: a bounding-box prefilter in SQL, then the exact
//! haversine distance for the radius cut and ordering.

use std::cmp::Ordering;

use models_listings::api::NearbyProperty;
use models_listings::db::Property;
use models_listings::geo::{bounding_box, haversine_km};
use sqlx::{Pool, Postgres};

use crate::error::ListingsDatabaseError;
use crate::properties::list::summaries_for;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Active listings within `radius_km` of the point, closest first.
#[tracing::instrument(skip(db))]
pub async fn nearby_properties(
    db: &Pool<Postgres>,
    lat: f64,
    lng: f64,
    radius_km: f64,
    limit: i64,
) -> Result<Vec<NearbyProperty>> {
    let bb = bounding_box(lat, lng, radius_km);

    let candidates = sqlx::query_as::<_, Property>(
        r#"
        SELECT p.*
        FROM properties p
        JOIN locations l ON l.id = p.location_id
        WHERE p.is_active
          AND l.latitude BETWEEN $1 AND $2
          AND l.longitude BETWEEN $3 AND $4
        "#,
    )
    .bind(bb.min_lat)
    .bind(bb.max_lat)
    .bind(bb.min_lon)
    .bind(bb.max_lon)
    .fetch_all(db)
    .await?;

    let summaries = summaries_for(db, candidates).await?;

    let mut nearby: Vec<NearbyProperty> = summaries
        .into_iter()
        .filter_map(|summary| {
            let distance =
                haversine_km(lat, lng, summary.location.latitude, summary.location.longitude);
            (distance <= radius_km).then(|| NearbyProperty {
                property: summary,
                distance_km: (distance * 100.0).round() / 100.0,
            })
        })
        .collect();

    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    nearby.truncate(limit as usize);

    Ok(nearby)
}
