//! Availability windows. Reading is open; changing them is for the host.

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
use listings_db_client::availability as availability_db;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::get as properties_get;
use models_listings::api::AvailabilityRequest;
use models_listings::db::Availability;

#[derive(Debug, Error)]
pub enum AvailabilityErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    PropertyNotFound,
    #[error("Availability window not found")]
    WindowNotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ListingsDatabaseError> for AvailabilityErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => AvailabilityErr::PropertyNotFound,
            ListingsDatabaseError::AvailabilityNotFound(_) => AvailabilityErr::WindowNotFound,
            other => AvailabilityErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for AvailabilityErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AvailabilityErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AvailabilityErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AvailabilityErr::PropertyNotFound | AvailabilityErr::WindowNotFound => {
                StatusCode::NOT_FOUND
            }
            AvailabilityErr::Forbidden(_) => StatusCode::FORBIDDEN,
            AvailabilityErr::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "AvailabilityErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// List a property's availability windows
#[utoipa::path(
    get,
    path = "/properties/{property_id}/availability",
    params(("property_id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Availability windows", body = [Availability]),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Availability"
)]
#[tracing::instrument(skip(context))]
pub async fn list_availability(
    State(context): State<ApiContext>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Vec<Availability>>, AvailabilityErr> {
    // 404 for unknown properties rather than an empty list.
    properties_get::get_property(&context.db, property_id).await?;

    let windows = availability_db::get::list_availability(&context.db, property_id).await?;

    Ok(Json(windows))
}

/// Add an availability window to a property owned by the caller
#[utoipa::path(
    post,
    path = "/properties/{property_id}/availability",
    params(("property_id" = Uuid, Path, description = "Property id")),
    request_body = AvailabilityRequest,
    responses(
        (status = 201, description = "Availability window created", body = Availability),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Availability"
)]
#[tracing::instrument(skip(context, user, request), fields(user_id = %user.id))]
pub async fn add_availability(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(property_id): Path<Uuid>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<(StatusCode, Json<Availability>), AvailabilityErr> {
    if let Err(err) = request.validate() {
        tracing::info!(error = %err, "availability validation failed");
        return Err(AvailabilityErr::InvalidRequest(err.to_string()));
    }

    let property = properties_get::get_property(&context.db, property_id).await?;
    access::ensure_property_owner(&property, user.id).map_err(AvailabilityErr::Forbidden)?;

    let window = availability_db::insert::add_availability(&context.db, property_id, &request)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                property_id = %property_id,
                "failed to add availability window"
            );
        })?;

    Ok((StatusCode::CREATED, Json(window)))
}

/// Delete an availability window from a property owned by the caller
#[utoipa::path(
    delete,
    path = "/properties/{property_id}/availability/{availability_id}",
    params(
        ("property_id" = Uuid, Path, description = "Property id"),
        ("availability_id" = Uuid, Path, description = "Availability window id")
    ),
    responses(
        (status = 204, description = "Availability window deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property or window not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Availability"
)]
#[tracing::instrument(skip(context, user), fields(user_id = %user.id))]
pub async fn delete_availability(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path((property_id, availability_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AvailabilityErr> {
    let property = properties_get::get_property(&context.db, property_id).await?;
    access::ensure_property_owner(&property, user.id).map_err(AvailabilityErr::Forbidden)?;

    let window = availability_db::get::get_availability(&context.db, availability_id).await?;
    if window.property_id != property_id {
        return Err(AvailabilityErr::WindowNotFound);
    }

    availability_db::delete::delete_availability(&context.db, availability_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
