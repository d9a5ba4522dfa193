//! Image management for a listing. All three handlers gate on ownership and
//! the delete keeps the listing above the minimum image count.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::domain::access;
use auth_service_client::UserIdentity;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::images as images_db;
use listings_db_client::properties::get as properties_get;
use models_listings::api::requests::MIN_IMAGES;
use models_listings::api::{ImagePayload, UpdateImageRequest};
use models_listings::db::PropertyImage;

#[derive(Debug, Error)]
pub enum PropertyImageErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    PropertyNotFound,
    #[error("Image not found")]
    ImageNotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ListingsDatabaseError> for PropertyImageErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => PropertyImageErr::PropertyNotFound,
            ListingsDatabaseError::ImageNotFound(_) => PropertyImageErr::ImageNotFound,
            other => PropertyImageErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for PropertyImageErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            PropertyImageErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PropertyImageErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PropertyImageErr::PropertyNotFound | PropertyImageErr::ImageNotFound => {
                StatusCode::NOT_FOUND
            }
            PropertyImageErr::Forbidden(_) => StatusCode::FORBIDDEN,
            PropertyImageErr::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "PropertyImageErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Loads the property and checks the caller owns it.
async fn owned_property(
    context: &ApiContext,
    property_id: Uuid,
    user_id: Uuid,
) -> Result<(), PropertyImageErr> {
    let property = properties_get::get_property(&context.db, property_id).await?;
    access::ensure_property_owner(&property, user_id).map_err(PropertyImageErr::Forbidden)
}

/// Add an image to a property owned by the caller
#[utoipa::path(
    post,
    path = "/properties/{property_id}/images",
    params(("property_id" = Uuid, Path, description = "Property id")),
    request_body = ImagePayload,
    responses(
        (status = 201, description = "Image added", body = PropertyImage),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Property images"
)]
#[tracing::instrument(skip(context, user, payload), fields(user_id = %user.id))]
pub async fn add_image(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(property_id): Path<Uuid>,
    Json(payload): Json<ImagePayload>,
) -> Result<(StatusCode, Json<PropertyImage>), PropertyImageErr> {
    owned_property(&context, property_id, user.id).await?;

    let image = images_db::insert::add_image(&context.db, property_id, &payload).await?;

    tracing::info!(
        property_id = %property_id,
        image_id = %image.id,
        "added property image"
    );

    Ok((StatusCode::CREATED, Json(image)))
}

/// Update an image on a property owned by the caller
#[utoipa::path(
    put,
    path = "/properties/{property_id}/images/{image_id}",
    params(
        ("property_id" = Uuid, Path, description = "Property id"),
        ("image_id" = Uuid, Path, description = "Image id")
    ),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Updated image", body = PropertyImage),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property or image not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Property images"
)]
#[tracing::instrument(skip(context, user, request), fields(user_id = %user.id))]
pub async fn update_image(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path((property_id, image_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateImageRequest>,
) -> Result<Json<PropertyImage>, PropertyImageErr> {
    owned_property(&context, property_id, user.id).await?;

    let image = images_db::get::get_image(&context.db, image_id).await?;
    if image.property_id != property_id {
        return Err(PropertyImageErr::ImageNotFound);
    }

    let image = images_db::update::update_image(&context.db, image_id, &request).await?;

    Ok(Json(image))
}

/// Delete an image from a property owned by the caller
#[utoipa::path(
    delete,
    path = "/properties/{property_id}/images/{image_id}",
    params(
        ("property_id" = Uuid, Path, description = "Property id"),
        ("image_id" = Uuid, Path, description = "Image id")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, description = "Property would drop below the minimum image count"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property or image not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Property images"
)]
#[tracing::instrument(skip(context, user), fields(user_id = %user.id))]
pub async fn delete_image(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path((property_id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, PropertyImageErr> {
    owned_property(&context, property_id, user.id).await?;

    let image = images_db::get::get_image(&context.db, image_id).await?;
    if image.property_id != property_id {
        return Err(PropertyImageErr::ImageNotFound);
    }

    let count = images_db::get::count_images(&context.db, property_id).await?;
    if count <= MIN_IMAGES as i64 {
        return Err(PropertyImageErr::InvalidRequest(format!(
            "A listing must keep at least {MIN_IMAGES} images"
        )));
    }

    images_db::delete::delete_image(&context.db, image_id).await?;

    tracing::info!(
        property_id = %property_id,
        image_id = %image_id,
        "deleted property image"
    );

    Ok(StatusCode::NO_CONTENT)
}
