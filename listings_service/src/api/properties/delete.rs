use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::domain::access;
use auth_service_client::UserIdentity;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::{delete as properties_delete, get as properties_get};

#[derive(Debug, Error)]
pub enum DeletePropertyErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    NotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
}

impl From<ListingsDatabaseError> for DeletePropertyErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => DeletePropertyErr::NotFound,
            other => DeletePropertyErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for DeletePropertyErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            DeletePropertyErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DeletePropertyErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DeletePropertyErr::NotFound => StatusCode::NOT_FOUND,
            DeletePropertyErr::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "DeletePropertyErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Delete a property owned by the caller
#[utoipa::path(
    delete,
    path = "/properties/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property id")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, user), fields(user_id = %user.id))]
pub async fn delete_property(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(property_id): Path<Uuid>,
) -> Result<StatusCode, DeletePropertyErr> {
    let property = properties_get::get_property(&context.db, property_id).await?;
    access::ensure_property_owner(&property, user.id).map_err(DeletePropertyErr::Forbidden)?;

    properties_delete::delete_property(&context.db, property_id)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                property_id = %property_id,
                "failed to delete property in database"
            );
        })?;

    tracing::info!(property_id = %property_id, "successfully deleted property");

    Ok(StatusCode::NO_CONTENT)
}
