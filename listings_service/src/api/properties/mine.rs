use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::context::ApiContext;
use auth_service_client::UserIdentity;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::list as properties_list;
use models_listings::api::{Page, Pagination, PropertyFilters, PropertySummary};

#[derive(Debug, Error)]
pub enum MyPropertiesErr {
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
    #[error("{0}")]
    InvalidQuery(String),
}

impl IntoResponse for MyPropertiesErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            MyPropertiesErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            MyPropertiesErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MyPropertiesErr::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "MyPropertiesErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// List the caller's own properties, inactive ones included
#[utoipa::path(
    get,
    path = "/my/properties",
    params(Pagination),
    responses(
        (status = 200, description = "One page of the caller's properties"),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, user), fields(user_id = %user.id))]
pub async fn my_properties(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<PropertySummary>>, MyPropertiesErr> {
    pagination
        .validate()
        .map_err(|e| MyPropertiesErr::InvalidQuery(e.to_string()))?;

    let filters = PropertyFilters {
        host_id: Some(user.id),
        ..Default::default()
    };
    let page = properties_list::list_properties(&context.db, &filters, pagination).await?;

    Ok(Json(page))
}
