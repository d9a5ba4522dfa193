use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::context::ApiContext;
use crate::domain::slug;
use auth_service_client::UserIdentity;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::{get as properties_get, insert as properties_insert};
use models_listings::api::{CreatePropertyRequest, HostProfile, PropertyDetail};

#[derive(Debug, Error)]
pub enum CreatePropertyErr {
    #[error("An unknown error has occurred")]
    InternalError(#[from] anyhow::Error),
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
    #[error("{0}")]
    InvalidRequest(String),
}

impl IntoResponse for CreatePropertyErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            CreatePropertyErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CreatePropertyErr::InternalError(_) | CreatePropertyErr::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CreatePropertyErr::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "CreatePropertyErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Create a new property listing
#[utoipa::path(
    post,
    path = "/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created successfully", body = PropertyDetail),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, user, request), fields(user_id = %user.id))]
pub async fn create_property(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Json(mut request): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyDetail>), CreatePropertyErr> {
    if let Err(err) = request.validate() {
        tracing::info!(error = %err, "property validation failed");
        return Err(CreatePropertyErr::InvalidRequest(err.to_string()));
    }

    let base = slug::slugify(&request.title);
    let mut candidate = base.clone();
    let mut attempt = 2;
    while properties_get::slug_exists(&context.db, &candidate).await? {
        candidate = slug::with_suffix(&base, attempt);
        attempt += 1;
    }

    let host = HostProfile {
        id: user.id,
        name: user.full_name(),
        email: user.email.clone(),
        avatar: user.avatar_url.clone(),
    };

    let detail = properties_insert::create_property(&context.db, &host, &candidate, &request)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                slug = %candidate,
                "failed to create property in database"
            );
        })?;

    tracing::info!(
        property_id = %detail.property.id,
        slug = %detail.property.slug,
        "successfully created property"
    );

    Ok((StatusCode::CREATED, Json(detail)))
}
