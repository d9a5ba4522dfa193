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
use listings_db_client::properties::get as properties_get;
use models_listings::api::PropertyDetail;

#[derive(Debug, Error)]
pub enum GetPropertyErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    NotFound,
}

impl From<ListingsDatabaseError> for GetPropertyErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => GetPropertyErr::NotFound,
            other => GetPropertyErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for GetPropertyErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            GetPropertyErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GetPropertyErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GetPropertyErr::NotFound => StatusCode::NOT_FOUND,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "GetPropertyErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Get a property with all relations
#[utoipa::path(
    get,
    path = "/properties/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property detail", body = PropertyDetail),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, user))]
pub async fn get_property(
    State(context): State<ApiContext>,
    user: Option<Extension<UserIdentity>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<PropertyDetail>, GetPropertyErr> {
    let detail = properties_get::get_property_detail(&context.db, property_id).await?;

    // Inactive listings exist only for their host.
    let viewer = user.map(|Extension(u)| u.id);
    if !access::can_view_property(&detail.property, viewer) {
        return Err(GetPropertyErr::NotFound);
    }

    Ok(Json(detail))
}
