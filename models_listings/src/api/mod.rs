//! Request, response and query-parameter types for the HTTP surface.

pub mod error;
pub mod pagination;
pub mod query_params;
pub mod requests;
pub mod responses;

pub use error::{
    AvailabilityValidationError, PropertyValidationError, QueryValidationError,
    ReviewValidationError,
};
pub use pagination::{Page, Pagination, MAX_PAGE_SIZE};
pub use query_params::{
    FeaturedQuery, ListPropertiesQuery, NearbyQuery, PropertyFilters, SearchPropertiesQuery,
};
pub use requests::{
    AvailabilityRequest, CreatePropertyRequest, CreateReviewRequest, HostProfile, ImagePayload,
    LocationPayload, UpdateImageRequest, UpdatePropertyRequest, UpdateReviewRequest,
};
pub use responses::{
    MessageResponse, NearbyProperty, PropertyDetail, PropertySummary, ReviewResponse,
};
