use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::context::ApiContext;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::get as properties_get;
use listings_db_client::reviews::list as reviews_list;
use models_listings::api::{Page, Pagination, ReviewResponse};

#[derive(Debug, Error)]
pub enum ListReviewsErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    PropertyNotFound,
    #[error("{0}")]
    InvalidQuery(String),
}

impl From<ListingsDatabaseError> for ListReviewsErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => ListReviewsErr::PropertyNotFound,
            other => ListReviewsErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for ListReviewsErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ListReviewsErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ListReviewsErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ListReviewsErr::PropertyNotFound => StatusCode::NOT_FOUND,
            ListReviewsErr::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "ListReviewsErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// List a property's reviews, newest first
#[utoipa::path(
    get,
    path = "/properties/{property_id}/reviews",
    params(("property_id" = Uuid, Path, description = "Property id"), Pagination),
    responses(
        (status = 200, description = "One page of reviews"),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "Property not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reviews"
)]
#[tracing::instrument(skip(context))]
pub async fn list_reviews(
    State(context): State<ApiContext>,
    Path(property_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<ReviewResponse>>, ListReviewsErr> {
    pagination
        .validate()
        .map_err(|e| ListReviewsErr::InvalidQuery(e.to_string()))?;

    let property = properties_get::get_property(&context.db, property_id).await?;
    if !property.is_active {
        return Err(ListReviewsErr::PropertyNotFound);
    }

    let page = reviews_list::list_reviews(&context.db, property_id, pagination).await?;

    Ok(Json(page))
}
