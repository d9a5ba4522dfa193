//! Filtered listing queries and the summary batch loader.

use std::collections::HashMap;

use models_listings::api::{Page, Pagination, PropertyFilters, PropertySummary};
use models_listings::db::{Location, Property};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::ListingsDatabaseError;

type Result<T> = std::result::Result<T, ListingsDatabaseError>;

const FROM_PROPERTIES: &str =
    " FROM properties p JOIN locations l ON l.id = p.location_id WHERE 1 = 1";

/// Appends the AND-composed predicate set to a query that selects from
/// `properties p JOIN locations l`.
pub(crate) fn push_filters<'a>(
    builder: &mut QueryBuilder<'a, Postgres>,
    filters: &'a PropertyFilters,
) {
    if let Some(host_id) = filters.host_id {
        builder.push(" AND p.host_id = ").push_bind(host_id);
    }
    if let Some(is_active) = filters.is_active {
        builder.push(" AND p.is_active = ").push_bind(is_active);
    }
    if let Some(is_featured) = filters.is_featured {
        builder.push(" AND p.is_featured = ").push_bind(is_featured);
    }
    if let Some(property_type) = &filters.property_type {
        builder.push(" AND p.property_type = ").push_bind(property_type);
    }
    if let Some(place_type) = &filters.place_type {
        builder.push(" AND p.place_type = ").push_bind(place_type);
    }
    if let Some(min_price) = filters.min_price {
        builder.push(" AND p.price_per_night >= ").push_bind(min_price);
    }
    if let Some(max_price) = filters.max_price {
        builder.push(" AND p.price_per_night <= ").push_bind(max_price);
    }
    if let Some(bedrooms) = filters.bedrooms {
        builder.push(" AND p.bedrooms >= ").push_bind(bedrooms);
    }
    if let Some(beds) = filters.beds {
        builder.push(" AND p.beds >= ").push_bind(beds);
    }
    if let Some(bathrooms) = filters.bathrooms {
        builder.push(" AND p.bathrooms >= ").push_bind(bathrooms);
    }
    if let Some(max_guests) = filters.max_guests {
        builder.push(" AND p.max_guests >= ").push_bind(max_guests);
    }
    if let Some(instant_book) = filters.instant_book {
        builder.push(" AND p.instant_book = ").push_bind(instant_book);
    }
    if let Some(city) = &filters.city {
        builder.push(" AND l.city ILIKE ").push_bind(format!("%{city}%"));
    }
    if let Some(country) = &filters.country {
        builder
            .push(" AND l.country ILIKE ")
            .push_bind(format!("%{country}%"));
    }
    if let Some(location) = &filters.location {
        let pattern = format!("%{location}%");
        builder
            .push(" AND (l.city ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR l.country ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    for amenity_id in &filters.amenity_ids {
        builder
            .push(" AND EXISTS (SELECT 1 FROM property_amenities pa WHERE pa.property_id = p.id AND pa.amenity_id = ")
            .push_bind(amenity_id)
            .push(")");
    }
    // A stay is possible when no window marked unavailable overlaps it.
    if let (Some(check_in), Some(check_out)) = (filters.check_in, filters.check_out) {
        builder
            .push(" AND NOT EXISTS (SELECT 1 FROM availabilities a WHERE a.property_id = p.id AND NOT a.is_available AND a.start_date < ")
            .push_bind(check_out)
            .push(" AND a.end_date > ")
            .push_bind(check_in)
            .push(")");
    }
}

async fn count_properties(db: &Pool<Postgres>, filters: &PropertyFilters) -> Result<i64> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");
    builder.push(FROM_PROPERTIES);
    push_filters(&mut builder, filters);

    let total: i64 = builder.build_query_scalar().fetch_one(db).await?;
    Ok(total)
}

/// One page of summaries matching the filters, plus the total match count.
#[tracing::instrument(skip(db, filters))]
pub async fn list_properties(
    db: &Pool<Postgres>,
    filters: &PropertyFilters,
    pagination: Pagination,
) -> Result<Page<PropertySummary>> {
    let total = count_properties(db, filters).await?;

    let mut builder = QueryBuilder::new("SELECT p.*");
    builder.push(FROM_PROPERTIES);
    push_filters(&mut builder, filters);
    builder.push(" ORDER BY ");
    builder.push(filters.sort_by.order_clause());
    builder.push(" LIMIT ").push_bind(pagination.limit());
    builder.push(" OFFSET ").push_bind(pagination.offset());

    let properties: Vec<Property> = builder.build_query_as().fetch_all(db).await?;
    let summaries = summaries_for(db, properties).await?;

    Ok(Page::new(summaries, total, pagination))
}

/// Active featured listings, best rated first.
#[tracing::instrument(skip(db))]
pub async fn featured_properties(
    db: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<PropertySummary>> {
    let properties = sqlx::query_as::<_, Property>(
        r#"
        SELECT *
        FROM properties
        WHERE is_active AND is_featured
        ORDER BY average_rating DESC, id ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;

    summaries_for(db, properties).await
}

/// Joins locations and cover images onto property rows, preserving order.
pub(crate) async fn summaries_for(
    db: &Pool<Postgres>,
    properties: Vec<Property>,
) -> Result<Vec<PropertySummary>> {
    if properties.is_empty() {
        return Ok(Vec::new());
    }

    let property_ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
    let location_ids: Vec<Uuid> = properties.iter().map(|p| p.location_id).collect();

    let locations = sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE id = ANY($1)")
        .bind(&location_ids)
        .fetch_all(db)
        .await?;
    let mut locations: HashMap<Uuid, Location> =
        locations.into_iter().map(|l| (l.id, l)).collect();

    // The cover image per property, falling back to the first by display
    // order when no row is flagged.
    let covers: Vec<(Uuid, String)> = sqlx::query_as(
        r#"
        SELECT DISTINCT ON (property_id) property_id, image_url
        FROM property_images
        WHERE property_id = ANY($1)
        ORDER BY property_id, is_cover DESC, display_order ASC
        "#,
    )
    .bind(&property_ids)
    .fetch_all(db)
    .await?;
    let mut covers: HashMap<Uuid, String> = covers.into_iter().collect();

    let mut summaries = Vec::with_capacity(properties.len());
    for property in properties {
        let location = locations
            .remove(&property.location_id)
            .ok_or(sqlx::Error::RowNotFound)?;
        let cover = covers.remove(&property.id);
        summaries.push(PropertySummary::from_parts(property, location, cover));
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use models_listings::shared::{PropertyType, SortBy};

    fn rendered(filters: &PropertyFilters) -> String {
        let mut builder = QueryBuilder::new("SELECT p.*");
        builder.push(FROM_PROPERTIES);
        push_filters(&mut builder, filters);
        builder.sql().to_string()
    }

    #[test]
    fn no_filters_adds_no_predicates() {
        let sql = rendered(&PropertyFilters::default());
        assert!(sql.ends_with("WHERE 1 = 1"));
    }

    #[test]
    fn price_and_type_predicates_are_appended() {
        let filters = PropertyFilters {
            min_price: Some(5000),
            max_price: Some(20000),
            property_type: Some(PropertyType::Apartment),
            ..PropertyFilters::public()
        };
        let sql = rendered(&filters);
        assert!(sql.contains("p.is_active = $1"));
        assert!(sql.contains("p.property_type = $2"));
        assert!(sql.contains("p.price_per_night >= $3"));
        assert!(sql.contains("p.price_per_night <= $4"));
    }

    #[test]
    fn location_matches_city_or_country() {
        let filters = PropertyFilters {
            location: Some("portugal".to_string()),
            ..Default::default()
        };
        let sql = rendered(&filters);
        assert!(sql.contains("(l.city ILIKE $1 OR l.country ILIKE $2)"));
    }

    #[test]
    fn each_amenity_requires_its_own_exists() {
        let filters = PropertyFilters {
            amenity_ids: vec![Uuid::now_v7(), Uuid::now_v7()],
            ..Default::default()
        };
        let sql = rendered(&filters);
        assert_eq!(sql.matches("EXISTS (SELECT 1 FROM property_amenities").count(), 2);
    }

    #[test]
    fn stay_dates_exclude_blocked_windows() {
        let filters = PropertyFilters {
            check_in: NaiveDate::from_ymd_opt(2026, 9, 1),
            check_out: NaiveDate::from_ymd_opt(2026, 9, 8),
            ..Default::default()
        };
        let sql = rendered(&filters);
        assert!(sql.contains("NOT EXISTS (SELECT 1 FROM availabilities"));
        assert!(sql.contains("NOT a.is_available"));
    }

    #[test]
    fn sort_clauses_have_deterministic_tail() {
        for sort in [SortBy::PriceAsc, SortBy::PriceDesc, SortBy::Rating, SortBy::Newest] {
            assert!(sort.order_clause().ends_with("p.id ASC"), "{sort:?}");
        }
    }
}
