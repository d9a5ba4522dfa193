use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::domain::{access, slug};
use auth_service_client::UserIdentity;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::{get as properties_get, update as properties_update};
use models_listings::api::{PropertyDetail, UpdatePropertyRequest};

#[derive(Debug, Error)]
pub enum UpdatePropertyErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    NotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ListingsDatabaseError> for UpdatePropertyErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => UpdatePropertyErr::NotFound,
            other => UpdatePropertyErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for UpdatePropertyErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            UpdatePropertyErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            UpdatePropertyErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UpdatePropertyErr::NotFound => StatusCode::NOT_FOUND,
            UpdatePropertyErr::Forbidden(_) => StatusCode::FORBIDDEN,
            UpdatePropertyErr::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "UpdatePropertyErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Update a property owned by the caller
#[utoipa::path(
    put,
    path = "/properties/{property_id}",
    params(("property_id" = Uuid, Path, description = "Property id")),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Updated property detail", body = PropertyDetail),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, user, request), fields(user_id = %user.id))]
pub async fn update_property(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(property_id): Path<Uuid>,
    Json(request): Json<UpdatePropertyRequest>,
) -> Result<Json<PropertyDetail>, UpdatePropertyErr> {
    if request.is_empty() {
        return Err(UpdatePropertyErr::InvalidRequest(
            "No fields provided to update".to_string(),
        ));
    }
    if let Err(err) = request.validate() {
        tracing::info!(error = %err, "property update validation failed");
        return Err(UpdatePropertyErr::InvalidRequest(err.to_string()));
    }

    let property = properties_get::get_property(&context.db, property_id).await?;
    access::ensure_property_owner(&property, user.id).map_err(UpdatePropertyErr::Forbidden)?;

    // A renamed listing gets its slug re-derived, probing for collisions the
    // same way create does. The listing's own slug never counts as taken.
    let mut new_slug = None;
    if let Some(title) = &request.title {
        if let Some(base) = slug::refreshed_base(&property.slug, title) {
            let mut candidate = base.clone();
            let mut attempt = 2;
            while candidate != property.slug
                && properties_get::slug_exists(&context.db, &candidate).await?
            {
                candidate = slug::with_suffix(&base, attempt);
                attempt += 1;
            }
            new_slug = Some(candidate);
        }
    }

    properties_update::update_property(&context.db, property_id, new_slug.as_deref(), &request)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                property_id = %property_id,
                "failed to update property in database"
            );
        })?;

    let detail = properties_get::get_property_detail(&context.db, property_id).await?;

    tracing::info!(property_id = %property_id, "successfully updated property");

    Ok(Json(detail))
}
