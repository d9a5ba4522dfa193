//! Partial property update. The row update, a location update and the
//! amenity/safety-feature link replacement run in one transaction.

use models_listings::api::UpdatePropertyRequest;
use models_listings::db::Property;
use sqlx::{Pool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;
use crate::properties::insert::{link_amenities, link_safety_features};

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

#[tracing::instrument(skip(db, request))]
pub async fn update_property(
    db: &Pool<Postgres>,
    property_id: Uuid,
    slug: Option<&str>,
    request: &UpdatePropertyRequest,
) -> Result<Property> {
    let mut tx = db.begin().await?;

    let property = match apply_update(&mut tx, property_id, slug, request).await {
        Ok(property) => property,
        Err(e) => {
            tracing::error!(
                error = ?e,
                property_id = %property_id,
                "property update failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after property update error"
                );
            }
            return Err(e);
        }
    };

    if let Err(e) = tx.commit().await {
        tracing::error!(error = ?e, "failed to commit property update transaction");
        return Err(e.into());
    }

    Ok(property)
}

fn push_row_update<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    slug: Option<&'a str>,
    request: &'a UpdatePropertyRequest,
) {
    if let Some(title) = &request.title {
        builder.push(", title = ").push_bind(title);
    }
    // The caller re-derives the slug when the title changes.
    if let Some(slug) = slug {
        builder.push(", slug = ").push_bind(slug);
    }
    if let Some(description) = &request.description {
        builder.push(", description = ").push_bind(description);
    }
    if let Some(property_type) = &request.property_type {
        builder.push(", property_type = ").push_bind(property_type);
    }
    if let Some(place_type) = &request.place_type {
        builder.push(", place_type = ").push_bind(place_type);
    }
    if let Some(bedrooms) = request.bedrooms {
        builder.push(", bedrooms = ").push_bind(bedrooms);
    }
    if let Some(beds) = request.beds {
        builder.push(", beds = ").push_bind(beds);
    }
    if let Some(bathrooms) = request.bathrooms {
        builder.push(", bathrooms = ").push_bind(bathrooms);
    }
    if let Some(max_guests) = request.max_guests {
        builder.push(", max_guests = ").push_bind(max_guests);
    }
    if let Some(max_adults) = request.max_adults {
        builder.push(", max_adults = ").push_bind(max_adults);
    }
    if let Some(max_children) = request.max_children {
        builder.push(", max_children = ").push_bind(max_children);
    }
    if let Some(max_infants) = request.max_infants {
        builder.push(", max_infants = ").push_bind(max_infants);
    }
    if let Some(pets_allowed) = request.pets_allowed {
        builder.push(", pets_allowed = ").push_bind(pets_allowed);
    }
    if let Some(price_per_night) = request.price_per_night {
        builder.push(", price_per_night = ").push_bind(price_per_night);
    }
    if let Some(currency) = &request.currency {
        builder.push(", currency = ").push_bind(currency);
    }
    if let Some(cleaning_fee) = request.cleaning_fee {
        builder.push(", cleaning_fee = ").push_bind(cleaning_fee);
    }
    if let Some(service_fee) = request.service_fee {
        builder.push(", service_fee = ").push_bind(service_fee);
    }
    if let Some(weekly_discount) = request.weekly_discount {
        builder.push(", weekly_discount = ").push_bind(weekly_discount);
    }
    if let Some(monthly_discount) = request.monthly_discount {
        builder.push(", monthly_discount = ").push_bind(monthly_discount);
    }
    if let Some(instant_book) = request.instant_book {
        builder.push(", instant_book = ").push_bind(instant_book);
    }
    if let Some(is_active) = request.is_active {
        builder.push(", is_active = ").push_bind(is_active);
        // First activation stamps the publish time; later toggles keep it.
        if is_active {
            builder.push(", published_at = COALESCE(published_at, now())");
        }
    }
}

async fn apply_update(
    tx: &mut Transaction<'_, Postgres>,
    property_id: Uuid,
    slug: Option<&str>,
    request: &UpdatePropertyRequest,
) -> Result<Property> {
    let mut builder = QueryBuilder::new("UPDATE properties SET updated_at = now()");
    push_row_update(&mut builder, slug, request);
    builder.push(" WHERE id = ").push_bind(property_id);
    builder.push(" RETURNING *");

    let property: Property = builder
        .build_query_as()
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(ListingsDatabaseError::PropertyNotFound(property_id))?;

    if let Some(location) = &request.location {
        sqlx::query(
            r#"
            UPDATE locations
            SET address = $1, city = $2, state = $3, country = $4,
                postal_code = $5, latitude = $6, longitude = $7
            WHERE id = $8
            "#,
        )
        .bind(&location.address)
        .bind(&location.city)
        .bind(&location.state)
        .bind(&location.country)
        .bind(&location.postal_code)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(property.location_id)
        .execute(&mut **tx)
        .await?;
    }

    // Link sets are replaced wholesale when present.
    if let Some(amenity_ids) = &request.amenity_ids {
        sqlx::query("DELETE FROM property_amenities WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut **tx)
            .await?;
        link_amenities(tx, property_id, amenity_ids).await?;
    }
    if let Some(safety_feature_ids) = &request.safety_feature_ids {
        sqlx::query("DELETE FROM property_safety_features WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut **tx)
            .await?;
        link_safety_features(tx, property_id, safety_feature_ids).await?;
    }

    Ok(property)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_fields_are_absent_from_set_clause() {
        let request = UpdatePropertyRequest {
            price_per_night: Some(9900),
            is_active: Some(true),
            ..Default::default()
        };
        let mut builder = QueryBuilder::new("UPDATE properties SET updated_at = now()");
        push_row_update(&mut builder, None, &request);
        let sql = builder.sql().to_string();

        assert!(sql.contains("price_per_night = $1"));
        assert!(sql.contains("is_active = $2"));
        assert!(sql.contains("published_at = COALESCE(published_at, now())"));
        assert!(!sql.contains("title"));
        assert!(!sql.contains("bedrooms"));
    }

    #[test]
    fn deactivation_keeps_published_at() {
        let request = UpdatePropertyRequest {
            is_active: Some(false),
            ..Default::default()
        };
        let mut builder = QueryBuilder::new("UPDATE properties SET updated_at = now()");
        push_row_update(&mut builder, None, &request);
        assert!(!builder.sql().contains("published_at"));
    }

    #[test]
    fn renamed_title_updates_the_slug_too() {
        let request = UpdatePropertyRequest {
            title: Some("Sunny loft by the canal".to_string()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::new("UPDATE properties SET updated_at = now()");
        push_row_update(&mut builder, Some("sunny-loft-by-the-canal"), &request);
        let sql = builder.sql().to_string();

        assert!(sql.contains("title = $1"));
        assert!(sql.contains("slug = $2"));
    }

    #[test]
    fn slug_is_untouched_without_a_rename() {
        let request = UpdatePropertyRequest {
            description: Some("A longer description of the place.".to_string()),
            ..Default::default()
        };
        let mut builder = QueryBuilder::new("UPDATE properties SET updated_at = now()");
        push_row_update(&mut builder, None, &request);
        assert!(!builder.sql().contains("slug"));
    }
}
