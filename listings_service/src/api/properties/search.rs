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
use models_listings::api::{Page, Pagination, PropertySummary, SearchPropertiesQuery};

#[derive(Debug, Error)]
pub enum SearchPropertiesErr {
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
    #[error("{0}")]
    InvalidQuery(String),
}

impl IntoResponse for SearchPropertiesErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            SearchPropertiesErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            SearchPropertiesErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SearchPropertiesErr::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "SearchPropertiesErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Search active properties by location, stay dates, guests and amenities
#[utoipa::path(
    get,
    path = "/properties/search",
    params(SearchPropertiesQuery, Pagination),
    responses(
        (status = 200, description = "One page of matching properties"),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, query))]
pub async fn search_properties(
    State(context): State<ApiContext>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<SearchPropertiesQuery>,
) -> Result<Json<Page<PropertySummary>>, SearchPropertiesErr> {
    pagination
        .validate()
        .map_err(|e| SearchPropertiesErr::InvalidQuery(e.to_string()))?;

    let filters = query
        .into_filters()
        .map_err(|e| SearchPropertiesErr::InvalidQuery(e.to_string()))?;

    let page = properties_list::list_properties(&context.db, &filters, pagination).await?;

    tracing::debug!(total = page.total, "searched properties");

    Ok(Json(page))
}
