use axum::Json;
use models_listings::api;
use models_listings::db;
use models_listings::shared;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        // Properties
        crate::api::properties::list::list_properties,
        crate::api::properties::search::search_properties,
        crate::api::properties::featured::featured_properties,
        crate::api::properties::nearby::nearby_properties,
        crate::api::properties::get::get_property,
        crate::api::properties::create::create_property,
        crate::api::properties::update::update_property,
        crate::api::properties::delete::delete_property,
        crate::api::properties::mine::my_properties,
        // Images
        crate::api::properties::images::add_image,
        crate::api::properties::images::update_image,
        crate::api::properties::images::delete_image,
        // Availability
        crate::api::properties::availability::list_availability,
        crate::api::properties::availability::add_availability,
        crate::api::properties::availability::delete_availability,
        // Reviews
        crate::api::reviews::list::list_reviews,
        crate::api::reviews::create::create_review,
        crate::api::reviews::update::update_review,
        crate::api::reviews::delete::delete_review,
        crate::api::reviews::helpful::mark_review_helpful,
        // Reference data
        crate::api::reference::list_amenities,
        crate::api::reference::list_safety_features,
    ),
    components(
        schemas(
            api::CreatePropertyRequest,
            api::UpdatePropertyRequest,
            api::LocationPayload,
            api::ImagePayload,
            api::UpdateImageRequest,
            api::AvailabilityRequest,
            api::CreateReviewRequest,
            api::UpdateReviewRequest,
            api::PropertyDetail,
            api::PropertySummary,
            api::NearbyProperty,
            api::MessageResponse,
            db::Property,
            db::Location,
            db::PropertyImage,
            db::Amenity,
            db::SafetyFeature,
            db::PropertyRule,
            db::Availability,
            db::Review,
            shared::PropertyType,
            shared::PlaceType,
            shared::VerificationStatus,
            shared::RuleType,
            shared::AmenityCategory,
            shared::SortBy,
        )
    ),
    tags(
        (name = "listings service", description = "Rental property listings service")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
#[tracing::instrument]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
