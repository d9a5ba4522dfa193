//! Query-parameter types for the public listing endpoints, and the internal
//! filter struct the db client builds predicates from.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::error::QueryValidationError;
use crate::shared::{PlaceType, PropertyType, SortBy};

pub const MIN_RADIUS_KM: f64 = 1.0;
pub const MAX_RADIUS_KM: f64 = 100.0;

/// The full AND-composed filter set understood by the property list query.
/// Absent fields are no-ops. This is the internal shape; the public query
/// types below convert into it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilters {
    pub host_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub property_type: Option<PropertyType>,
    pub place_type: Option<PlaceType>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub bedrooms: Option<i32>,
    pub beds: Option<i32>,
    pub bathrooms: Option<f64>,
    pub max_guests: Option<i32>,
    pub instant_book: Option<bool>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Substring matched against both city and country.
    pub location: Option<String>,
    /// Property must carry every listed amenity.
    pub amenity_ids: Vec<Uuid>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub sort_by: SortBy,
}

impl PropertyFilters {
    /// The baseline for every public endpoint: only active listings.
    pub fn public() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), QueryValidationError> {
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out <= check_in {
                return Err(QueryValidationError::InvalidDateRange);
            }
        }
        Ok(())
    }
}

/// Filters accepted by `GET /properties`.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListPropertiesQuery {
    pub property_type: Option<PropertyType>,
    pub place_type: Option<PlaceType>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Minimum price in cents.
    pub min_price: Option<i64>,
    /// Maximum price in cents.
    pub max_price: Option<i64>,
    pub bedrooms: Option<i32>,
    pub beds: Option<i32>,
    pub bathrooms: Option<f64>,
    pub max_guests: Option<i32>,
    pub instant_book: Option<bool>,
    #[serde(default)]
    pub sort_by: SortBy,
}

impl From<ListPropertiesQuery> for PropertyFilters {
    fn from(query: ListPropertiesQuery) -> Self {
        PropertyFilters {
            property_type: query.property_type,
            place_type: query.place_type,
            city: query.city,
            country: query.country,
            min_price: query.min_price,
            max_price: query.max_price,
            bedrooms: query.bedrooms,
            beds: query.beds,
            bathrooms: query.bathrooms,
            max_guests: query.max_guests,
            instant_book: query.instant_book,
            sort_by: query.sort_by,
            ..PropertyFilters::public()
        }
    }
}

/// Filters accepted by `GET /properties/search`. A superset of the list
/// filters: free-text location, stay dates, guest counts and amenity ids.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchPropertiesQuery {
    /// City or country substring.
    pub location: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: Option<i32>,
    pub children: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub place_type: Option<PlaceType>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub bedrooms: Option<i32>,
    pub beds: Option<i32>,
    pub bathrooms: Option<f64>,
    pub max_guests: Option<i32>,
    /// Comma-separated amenity ids; all must be present.
    pub amenities: Option<String>,
    pub instant_book: Option<bool>,
    #[serde(default)]
    pub sort_by: SortBy,
}

impl SearchPropertiesQuery {
    pub fn into_filters(self) -> Result<PropertyFilters, QueryValidationError> {
        // Requested adults plus children must fit the listing's capacity; an
        // explicit max_guests filter wins when both are provided.
        let guests = self
            .max_guests
            .or_else(|| self.adults.map(|a| a + self.children.unwrap_or(0)));

        let mut amenity_ids = Vec::new();
        if let Some(raw) = &self.amenities {
            for piece in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let id = piece
                    .parse::<Uuid>()
                    .map_err(|_| QueryValidationError::InvalidAmenityId(piece.to_string()))?;
                amenity_ids.push(id);
            }
        }

        let filters = PropertyFilters {
            location: self.location,
            check_in: self.check_in,
            check_out: self.check_out,
            property_type: self.property_type,
            place_type: self.place_type,
            min_price: self.min_price,
            max_price: self.max_price,
            bedrooms: self.bedrooms,
            beds: self.beds,
            bathrooms: self.bathrooms,
            max_guests: guests,
            instant_book: self.instant_book,
            amenity_ids,
            sort_by: self.sort_by,
            ..PropertyFilters::public()
        };
        filters.validate()?;
        Ok(filters)
    }
}

fn default_radius() -> f64 {
    10.0
}

fn default_nearby_limit() -> i64 {
    20
}

/// Parameters for `GET /properties/nearby`.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in kilometers, 1-100.
    #[serde(default = "default_radius")]
    pub radius_km: f64,
    #[serde(default = "default_nearby_limit")]
    pub limit: i64,
}

impl NearbyQuery {
    pub fn validate(&self) -> Result<(), QueryValidationError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(QueryValidationError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(QueryValidationError::LongitudeOutOfRange(self.lng));
        }
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&self.radius_km) {
            return Err(QueryValidationError::RadiusOutOfRange {
                radius_km: self.radius_km,
                min: MIN_RADIUS_KM,
                max: MAX_RADIUS_KM,
            });
        }
        if self.limit < 1 || self.limit > 100 {
            return Err(QueryValidationError::PageSizeOutOfRange {
                page_size: self.limit,
                max: 100,
            });
        }
        Ok(())
    }
}

fn default_featured_limit() -> i64 {
    10
}

/// Parameters for `GET /properties/featured`.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct FeaturedQuery {
    #[serde(default = "default_featured_limit")]
    pub limit: i64,
}

impl FeaturedQuery {
    pub fn validate(&self) -> Result<(), QueryValidationError> {
        if self.limit < 1 || self.limit > 50 {
            return Err(QueryValidationError::PageSizeOutOfRange {
                page_size: self.limit,
                max: 50,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_filters_pin_active() {
        let filters = PropertyFilters::public();
        assert_eq!(filters.is_active, Some(true));
        assert!(filters.amenity_ids.is_empty());
    }

    #[test]
    fn search_guest_arithmetic_sums_adults_and_children() {
        let query = SearchPropertiesQuery {
            adults: Some(2),
            children: Some(3),
            ..Default::default()
        };
        let filters = query.into_filters().unwrap();
        assert_eq!(filters.max_guests, Some(5));
    }

    #[test]
    fn explicit_max_guests_wins_over_arithmetic() {
        let query = SearchPropertiesQuery {
            adults: Some(2),
            max_guests: Some(8),
            ..Default::default()
        };
        assert_eq!(query.into_filters().unwrap().max_guests, Some(8));
    }

    #[test]
    fn amenities_parse_from_comma_separated_ids() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let query = SearchPropertiesQuery {
            amenities: Some(format!("{a}, {b}")),
            ..Default::default()
        };
        assert_eq!(query.into_filters().unwrap().amenity_ids, vec![a, b]);
    }

    #[test]
    fn inverted_stay_dates_are_rejected() {
        let query = SearchPropertiesQuery {
            check_in: Some(NaiveDate::from_ymd_opt(2026, 9, 10).unwrap()),
            check_out: Some(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            query.into_filters(),
            Err(QueryValidationError::InvalidDateRange)
        );
    }

    #[test]
    fn nearby_bounds() {
        let query = NearbyQuery {
            lat: 48.85,
            lng: 2.35,
            radius_km: 10.0,
            limit: 20,
        };
        assert!(query.validate().is_ok());

        let query = NearbyQuery {
            radius_km: 500.0,
            ..query
        };
        assert!(matches!(
            query.validate(),
            Err(QueryValidationError::RadiusOutOfRange { .. })
        ));
    }
}
