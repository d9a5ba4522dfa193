//! Request payloads and their validation.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{
    AvailabilityValidationError, PropertyValidationError, ReviewValidationError,
};
use crate::shared::{PlaceType, PropertyType};

pub const MIN_IMAGES: usize = 3;
const TITLE_MIN: usize = 10;
const TITLE_MAX: usize = 200;
const DESCRIPTION_MIN: usize = 50;

/// The identity of the caller creating or owning a listing, as reported by
/// the auth service. Denormalized onto the property row.
#[derive(Debug, Clone)]
pub struct HostProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LocationPayload {
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationPayload {
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PropertyValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PropertyValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ImagePayload {
    pub image_url: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_cover: bool,
    pub alt_text: Option<String>,
}

fn default_one() -> i32 {
    1
}

fn default_two() -> i32 {
    2
}

fn default_bathrooms() -> f64 {
    1.0
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub place_type: PlaceType,

    #[serde(default = "default_one")]
    pub bedrooms: i32,
    #[serde(default = "default_one")]
    pub beds: i32,
    #[serde(default = "default_bathrooms")]
    pub bathrooms: f64,
    #[serde(default = "default_two")]
    pub max_guests: i32,
    #[serde(default = "default_two")]
    pub max_adults: i32,
    #[serde(default)]
    pub max_children: i32,
    #[serde(default)]
    pub max_infants: i32,
    #[serde(default)]
    pub pets_allowed: bool,

    /// Nightly price in cents.
    pub price_per_night: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub cleaning_fee: i64,
    #[serde(default)]
    pub service_fee: i64,
    #[serde(default)]
    pub weekly_discount: i32,
    #[serde(default)]
    pub monthly_discount: i32,
    #[serde(default)]
    pub instant_book: bool,

    pub location: LocationPayload,
    #[serde(default)]
    pub amenity_ids: Vec<Uuid>,
    #[serde(default)]
    pub safety_feature_ids: Vec<Uuid>,
    pub images: Vec<ImagePayload>,
    #[serde(default)]
    pub house_rules: Vec<String>,
    pub cancellation_policy: Option<String>,
    pub check_in_policy: Option<String>,
}

impl CreatePropertyRequest {
    /// Validate the payload and promote the first image to cover when none is
    /// marked. A listing is only publishable with at least three images and
    /// exactly one cover.
    pub fn validate(&mut self) -> Result<(), PropertyValidationError> {
        let title_len = self.title.chars().count();
        if title_len < TITLE_MIN || title_len > TITLE_MAX {
            return Err(PropertyValidationError::InvalidTitleLength {
                length: title_len,
                min: TITLE_MIN,
                max: TITLE_MAX,
            });
        }
        if self.description.chars().count() < DESCRIPTION_MIN {
            return Err(PropertyValidationError::DescriptionTooShort {
                min: DESCRIPTION_MIN,
            });
        }
        if self.price_per_night <= 0 {
            return Err(PropertyValidationError::NonPositivePrice);
        }
        if self.max_guests <= 0 {
            return Err(PropertyValidationError::NonPositiveGuests);
        }
        if self.currency.len() != 3 {
            return Err(PropertyValidationError::InvalidCurrency);
        }
        if !(0..=100).contains(&self.weekly_discount) {
            return Err(PropertyValidationError::DiscountOutOfRange {
                field: "weekly_discount",
            });
        }
        if !(0..=100).contains(&self.monthly_discount) {
            return Err(PropertyValidationError::DiscountOutOfRange {
                field: "monthly_discount",
            });
        }

        self.location.validate()?;

        if self.images.len() < MIN_IMAGES {
            return Err(PropertyValidationError::TooFewImages {
                count: self.images.len(),
                min: MIN_IMAGES,
            });
        }
        match self.images.iter().filter(|img| img.is_cover).count() {
            0 => self.images[0].is_cover = true,
            1 => {}
            _ => return Err(PropertyValidationError::MultipleCoverImages),
        }

        Ok(())
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub place_type: Option<PlaceType>,
    pub bedrooms: Option<i32>,
    pub beds: Option<i32>,
    pub bathrooms: Option<f64>,
    pub max_guests: Option<i32>,
    pub max_adults: Option<i32>,
    pub max_children: Option<i32>,
    pub max_infants: Option<i32>,
    pub pets_allowed: Option<bool>,
    pub price_per_night: Option<i64>,
    pub currency: Option<String>,
    pub cleaning_fee: Option<i64>,
    pub service_fee: Option<i64>,
    pub weekly_discount: Option<i32>,
    pub monthly_discount: Option<i32>,
    pub instant_book: Option<bool>,
    pub is_active: Option<bool>,
    pub location: Option<LocationPayload>,
    pub amenity_ids: Option<Vec<Uuid>>,
    pub safety_feature_ids: Option<Vec<Uuid>>,
}

impl UpdatePropertyRequest {
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        if let Some(title) = &self.title {
            let len = title.chars().count();
            if len < TITLE_MIN || len > TITLE_MAX {
                return Err(PropertyValidationError::InvalidTitleLength {
                    length: len,
                    min: TITLE_MIN,
                    max: TITLE_MAX,
                });
            }
        }
        if let Some(description) = &self.description {
            if description.chars().count() < DESCRIPTION_MIN {
                return Err(PropertyValidationError::DescriptionTooShort {
                    min: DESCRIPTION_MIN,
                });
            }
        }
        if matches!(self.price_per_night, Some(price) if price <= 0) {
            return Err(PropertyValidationError::NonPositivePrice);
        }
        if matches!(self.max_guests, Some(guests) if guests <= 0) {
            return Err(PropertyValidationError::NonPositiveGuests);
        }
        if matches!(&self.currency, Some(c) if c.len() != 3) {
            return Err(PropertyValidationError::InvalidCurrency);
        }
        if matches!(self.weekly_discount, Some(d) if !(0..=100).contains(&d)) {
            return Err(PropertyValidationError::DiscountOutOfRange {
                field: "weekly_discount",
            });
        }
        if matches!(self.monthly_discount, Some(d) if !(0..=100).contains(&d)) {
            return Err(PropertyValidationError::DiscountOutOfRange {
                field: "monthly_discount",
            });
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }

    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.property_type.is_none()
            && self.place_type.is_none()
            && self.bedrooms.is_none()
            && self.beds.is_none()
            && self.bathrooms.is_none()
            && self.max_guests.is_none()
            && self.max_adults.is_none()
            && self.max_children.is_none()
            && self.max_infants.is_none()
            && self.pets_allowed.is_none()
            && self.price_per_night.is_none()
            && self.currency.is_none()
            && self.cleaning_fee.is_none()
            && self.service_fee.is_none()
            && self.weekly_discount.is_none()
            && self.monthly_discount.is_none()
            && self.instant_book.is_none()
            && self.is_active.is_none()
            && self.location.is_none()
            && self.amenity_ids.is_none()
            && self.safety_feature_ids.is_none()
    }
}

fn validate_rating(
    field: &'static str,
    value: Option<i16>,
) -> Result<(), ReviewValidationError> {
    match value {
        Some(v) if !(1..=5).contains(&v) => {
            Err(ReviewValidationError::RatingOutOfRange { field, value: v })
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    /// Overall rating, 1-5.
    pub rating: i16,
    pub comment: Option<String>,
    pub cleanliness_rating: Option<i16>,
    pub accuracy_rating: Option<i16>,
    pub communication_rating: Option<i16>,
    pub location_rating: Option<i16>,
    pub check_in_rating: Option<i16>,
    pub value_rating: Option<i16>,
    #[serde(default)]
    pub is_verified_stay: bool,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        validate_rating("rating", Some(self.rating))?;
        validate_rating("cleanliness_rating", self.cleanliness_rating)?;
        validate_rating("accuracy_rating", self.accuracy_rating)?;
        validate_rating("communication_rating", self.communication_rating)?;
        validate_rating("location_rating", self.location_rating)?;
        validate_rating("check_in_rating", self.check_in_rating)?;
        validate_rating("value_rating", self.value_rating)?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub cleanliness_rating: Option<i16>,
    pub accuracy_rating: Option<i16>,
    pub communication_rating: Option<i16>,
    pub location_rating: Option<i16>,
    pub check_in_rating: Option<i16>,
    pub value_rating: Option<i16>,
}

impl UpdateReviewRequest {
    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        validate_rating("rating", self.rating)?;
        validate_rating("cleanliness_rating", self.cleanliness_rating)?;
        validate_rating("accuracy_rating", self.accuracy_rating)?;
        validate_rating("communication_rating", self.communication_rating)?;
        validate_rating("location_rating", self.location_rating)?;
        validate_rating("check_in_rating", self.check_in_rating)?;
        validate_rating("value_rating", self.value_rating)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateImageRequest {
    pub display_order: Option<i32>,
    pub is_cover: Option<bool>,
    pub alt_text: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub price_override: Option<i64>,
}

fn default_true() -> bool {
    true
}

impl AvailabilityRequest {
    pub fn validate(&self) -> Result<(), AvailabilityValidationError> {
        if self.end_date < self.start_date {
            return Err(AvailabilityValidationError::InvalidDateRange);
        }
        if matches!(self.price_override, Some(price) if price <= 0) {
            return Err(AvailabilityValidationError::NonPositivePriceOverride);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreatePropertyRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Sunny loft in the old town",
            "description": "A bright and quiet loft two minutes from the river, with a full kitchen.",
            "property_type": "apartment",
            "place_type": "entire_place",
            "price_per_night": 12500,
            "location": {
                "address": "12 Riverside Walk",
                "city": "Lisbon",
                "country": "Portugal",
                "latitude": 38.7223,
                "longitude": -9.1393
            },
            "images": [
                {"image_url": "https://img.example/1.jpg"},
                {"image_url": "https://img.example/2.jpg"},
                {"image_url": "https://img.example/3.jpg"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn valid_request_promotes_first_image_to_cover() {
        let mut req = base_request();
        req.validate().unwrap();
        assert!(req.images[0].is_cover);
        assert_eq!(req.images.iter().filter(|i| i.is_cover).count(), 1);
    }

    #[test]
    fn fewer_than_three_images_is_rejected() {
        let mut req = base_request();
        req.images.truncate(2);
        assert_eq!(
            req.validate(),
            Err(PropertyValidationError::TooFewImages { count: 2, min: 3 })
        );
    }

    #[test]
    fn two_cover_images_is_rejected() {
        let mut req = base_request();
        req.images[0].is_cover = true;
        req.images[1].is_cover = true;
        assert_eq!(
            req.validate(),
            Err(PropertyValidationError::MultipleCoverImages)
        );
    }

    #[test]
    fn price_must_be_positive() {
        let mut req = base_request();
        req.price_per_night = 0;
        assert_eq!(req.validate(), Err(PropertyValidationError::NonPositivePrice));
    }

    #[test]
    fn latitude_is_range_checked() {
        let mut req = base_request();
        req.location.latitude = 91.0;
        assert_eq!(
            req.validate(),
            Err(PropertyValidationError::LatitudeOutOfRange(91.0))
        );
    }

    #[test]
    fn review_rating_bounds() {
        let req: CreateReviewRequest =
            serde_json::from_value(serde_json::json!({"rating": 6})).unwrap();
        assert_eq!(
            req.validate(),
            Err(ReviewValidationError::RatingOutOfRange {
                field: "rating",
                value: 6
            })
        );

        let req: CreateReviewRequest =
            serde_json::from_value(serde_json::json!({"rating": 4, "value_rating": 0})).unwrap();
        assert_eq!(
            req.validate(),
            Err(ReviewValidationError::RatingOutOfRange {
                field: "value_rating",
                value: 0
            })
        );
    }

    #[test]
    fn availability_dates_are_ordered() {
        let req: AvailabilityRequest = serde_json::from_value(serde_json::json!({
            "start_date": "2026-09-10",
            "end_date": "2026-09-01"
        }))
        .unwrap();
        assert_eq!(
            req.validate(),
            Err(AvailabilityValidationError::InvalidDateRange)
        );
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdatePropertyRequest::default().is_empty());
        let update = UpdatePropertyRequest {
            bedrooms: Some(2),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
