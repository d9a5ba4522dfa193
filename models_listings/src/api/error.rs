//! Validation errors for the API types. Handlers map these to 400 responses.

use thiserror::Error;

/// Errors from validating a property create/update payload.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertyValidationError {
    #[error("Title length {length} is invalid. Must be between {min} and {max} characters.")]
    InvalidTitleLength {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Description must be at least {min} characters.")]
    DescriptionTooShort { min: usize },

    #[error("Property must have at least {min} images, {count} provided.")]
    TooFewImages { count: usize, min: usize },

    #[error("Only one image can be marked as cover.")]
    MultipleCoverImages,

    #[error("Price per night must be positive.")]
    NonPositivePrice,

    #[error("Maximum guest count must be positive.")]
    NonPositiveGuests,

    #[error("Currency must be a three-letter code.")]
    InvalidCurrency,

    #[error("{field} must be between 0 and 100 percent.")]
    DiscountOutOfRange { field: &'static str },

    #[error("Latitude {0} is outside [-90, 90].")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180].")]
    LongitudeOutOfRange(f64),
}

/// Errors from validating a review payload.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReviewValidationError {
    #[error("{field} must be between 1 and 5, got {value}.")]
    RatingOutOfRange { field: &'static str, value: i16 },
}

/// Errors from validating an availability payload.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AvailabilityValidationError {
    #[error("end_date must not be before start_date.")]
    InvalidDateRange,

    #[error("Price override must be positive.")]
    NonPositivePriceOverride,
}

/// Errors from validating query parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryValidationError {
    #[error("page must be at least 1, got {page}.")]
    PageOutOfRange { page: i64 },

    #[error("page_size must be between 1 and {max}, got {page_size}.")]
    PageSizeOutOfRange { page_size: i64, max: i64 },

    #[error("radius_km must be between {min} and {max}, got {radius_km}.")]
    RadiusOutOfRange {
        radius_km: f64,
        min: f64,
        max: f64,
    },

    #[error("Latitude {0} is outside [-90, 90].")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside [-180, 180].")]
    LongitudeOutOfRange(f64),

    #[error("check_out must be after check_in.")]
    InvalidDateRange,

    #[error("'{0}' is not a valid amenity id.")]
    InvalidAmenityId(String),
}
