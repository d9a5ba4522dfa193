//! Transactional property creation: location, property row, images, amenity
//! and safety-feature links, and rules are written atomically.

use models_listings::api::{CreatePropertyRequest, HostProfile, PropertyDetail};
use models_listings::db::{Location, Property};
use models_listings::shared::RuleType;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

/// Creates a property with all of its relations. The new listing is active
/// and published immediately.
#[tracing::instrument(skip(db, host, request), fields(host_id = %host.id, slug = %slug))]
pub async fn create_property(
    db: &Pool<Postgres>,
    host: &HostProfile,
    slug: &str,
    request: &CreatePropertyRequest,
) -> Result<PropertyDetail> {
    let mut tx = db.begin().await?;

    let property_id = match insert_property_graph(&mut tx, host, slug, request).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(
                error = ?e,
                slug = %slug,
                "property insert failed, rolling back transaction"
            );
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(
                    error = ?rollback_err,
                    "failed to rollback transaction after property insert error"
                );
            }
            return Err(e);
        }
    };

    if let Err(e) = tx.commit().await {
        tracing::error!(error = ?e, "failed to commit property create transaction");
        return Err(e.into());
    }

    super::get::get_property_detail(db, property_id).await
}

async fn insert_property_graph(
    tx: &mut Transaction<'_, Postgres>,
    host: &HostProfile,
    slug: &str,
    request: &CreatePropertyRequest,
) -> Result<Uuid> {
    let location = sqlx::query_as::<_, Location>(
        r#"
        INSERT INTO locations (id, address, city, state, country, postal_code, latitude, longitude)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&request.location.address)
    .bind(&request.location.city)
    .bind(&request.location.state)
    .bind(&request.location.country)
    .bind(&request.location.postal_code)
    .bind(request.location.latitude)
    .bind(request.location.longitude)
    .fetch_one(&mut **tx)
    .await?;

    let property = sqlx::query_as::<_, Property>(
        r#"
        INSERT INTO properties (
            id, title, slug, description, property_type, place_type,
            bedrooms, beds, bathrooms, max_guests, max_adults, max_children, max_infants,
            pets_allowed, price_per_night, currency, cleaning_fee, service_fee,
            weekly_discount, monthly_discount, instant_book, location_id,
            is_active, published_at, host_id, host_name, host_email, host_avatar
        )
        VALUES (
            $1, $2, $3, $4, $5, $6,
            $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18,
            $19, $20, $21, $22,
            TRUE, now(), $23, $24, $25, $26
        )
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(&request.title)
    .bind(slug)
    .bind(&request.description)
    .bind(&request.property_type)
    .bind(&request.place_type)
    .bind(request.bedrooms)
    .bind(request.beds)
    .bind(request.bathrooms)
    .bind(request.max_guests)
    .bind(request.max_adults)
    .bind(request.max_children)
    .bind(request.max_infants)
    .bind(request.pets_allowed)
    .bind(request.price_per_night)
    .bind(&request.currency)
    .bind(request.cleaning_fee)
    .bind(request.service_fee)
    .bind(request.weekly_discount)
    .bind(request.monthly_discount)
    .bind(request.instant_book)
    .bind(location.id)
    .bind(host.id)
    .bind(&host.name)
    .bind(&host.email)
    .bind(&host.avatar)
    .fetch_one(&mut **tx)
    .await?;

    for (index, image) in request.images.iter().enumerate() {
        let display_order = if image.display_order > 0 {
            image.display_order
        } else {
            index as i32
        };
        sqlx::query(
            r#"
            INSERT INTO property_images (id, property_id, image_url, display_order, is_cover, alt_text)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(property.id)
        .bind(&image.image_url)
        .bind(display_order)
        .bind(image.is_cover)
        .bind(&image.alt_text)
        .execute(&mut **tx)
        .await?;
    }

    link_amenities(tx, property.id, &request.amenity_ids).await?;
    link_safety_features(tx, property.id, &request.safety_feature_ids).await?;

    for rule_text in &request.house_rules {
        insert_rule(tx, property.id, rule_text, RuleType::HouseRules).await?;
    }
    if let Some(policy) = &request.cancellation_policy {
        insert_rule(tx, property.id, policy, RuleType::CancellationPolicy).await?;
    }
    if let Some(policy) = &request.check_in_policy {
        insert_rule(tx, property.id, policy, RuleType::CheckInPolicy).await?;
    }

    Ok(property.id)
}

/// Unknown ids are skipped rather than rejected; the join insert only picks
/// up rows present in the catalog.
pub(crate) async fn link_amenities(
    tx: &mut Transaction<'_, Postgres>,
    property_id: Uuid,
    amenity_ids: &[Uuid],
) -> Result<()> {
    if amenity_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        r#"
        INSERT INTO property_amenities (property_id, amenity_id)
        SELECT $1, id FROM amenities WHERE id = ANY($2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(property_id)
    .bind(amenity_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub(crate) async fn link_safety_features(
    tx: &mut Transaction<'_, Postgres>,
    property_id: Uuid,
    safety_feature_ids: &[Uuid],
) -> Result<()> {
    if safety_feature_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        r#"
        INSERT INTO property_safety_features (property_id, safety_feature_id)
        SELECT $1, id FROM safety_features WHERE id = ANY($2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(property_id)
    .bind(safety_feature_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_rule(
    tx: &mut Transaction<'_, Postgres>,
    property_id: Uuid,
    rule_text: &str,
    rule_type: RuleType,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO property_rules (id, property_id, rule_text, rule_type) VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::now_v7())
    .bind(property_id)
    .bind(rule_text)
    .bind(rule_type)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
