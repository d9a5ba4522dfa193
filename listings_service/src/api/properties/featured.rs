use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::context::ApiContext;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::list as properties_list;
use models_listings::api::{FeaturedQuery, PropertySummary};

#[derive(Debug, Error)]
pub enum FeaturedPropertiesErr {
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
    #[error("{0}")]
    InvalidQuery(String),
}

impl IntoResponse for FeaturedPropertiesErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            FeaturedPropertiesErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            FeaturedPropertiesErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FeaturedPropertiesErr::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "FeaturedPropertiesErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// List featured properties, best rated first
#[utoipa::path(
    get,
    path = "/properties/featured",
    params(FeaturedQuery),
    responses(
        (status = 200, description = "Featured properties", body = [PropertySummary]),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
#[tracing::instrument(skip(context))]
pub async fn featured_properties(
    State(context): State<ApiContext>,
    Query(query): Query<FeaturedQuery>,
) -> Result<Json<Vec<PropertySummary>>, FeaturedPropertiesErr> {
    query
        .validate()
        .map_err(|e| FeaturedPropertiesErr::InvalidQuery(e.to_string()))?;

    let featured = properties_list::featured_properties(&context.db, query.limit).await?;

    Ok(Json(featured))
}
