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
use models_listings::api::{
    ListPropertiesQuery, Page, Pagination, PropertyFilters, PropertySummary,
};

#[derive(Debug, Error)]
pub enum ListPropertiesErr {
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
    #[error("{0}")]
    InvalidQuery(String),
}

impl IntoResponse for ListPropertiesErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ListPropertiesErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ListPropertiesErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListPropertiesErr::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "ListPropertiesErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// List active properties with filters and pagination
#[utoipa::path(
    get,
    path = "/properties",
    params(ListPropertiesQuery, Pagination),
    responses(
        (status = 200, description = "One page of matching properties"),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
#[tracing::instrument(skip(context, query))]
pub async fn list_properties(
    State(context): State<ApiContext>,
    Query(pagination): Query<Pagination>,
    Query(query): Query<ListPropertiesQuery>,
) -> Result<Json<Page<PropertySummary>>, ListPropertiesErr> {
    pagination
        .validate()
        .map_err(|e| ListPropertiesErr::InvalidQuery(e.to_string()))?;

    let filters = PropertyFilters::from(query);
    let page = properties_list::list_properties(&context.db, &filters, pagination).await?;

    tracing::debug!(total = page.total, "listed properties");

    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_answers_service_unavailable() {
        let err = ListPropertiesErr::DatabaseError(ListingsDatabaseError::Query(
            sqlx::Error::PoolTimedOut,
        ));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn query_failure_stays_internal_server_error() {
        let err = ListPropertiesErr::DatabaseError(ListingsDatabaseError::Query(
            sqlx::Error::RowNotFound,
        ));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
