use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::context::ApiContext;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::reviews::update as reviews_update;
use models_listings::api::ReviewResponse;

#[derive(Debug, Error)]
pub enum MarkHelpfulErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Review not found")]
    NotFound,
}

impl From<ListingsDatabaseError> for MarkHelpfulErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::ReviewNotFound(_) => MarkHelpfulErr::NotFound,
            other => MarkHelpfulErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for MarkHelpfulErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            MarkHelpfulErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            MarkHelpfulErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MarkHelpfulErr::NotFound => StatusCode::NOT_FOUND,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "MarkHelpfulErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Mark a review as helpful
#[utoipa::path(
    post,
    path = "/reviews/{review_id}/helpful",
    params(("review_id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review with bumped helpful count", body = ReviewResponse),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reviews"
)]
#[tracing::instrument(skip(context))]
pub async fn mark_review_helpful(
    State(context): State<ApiContext>,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ReviewResponse>, MarkHelpfulErr> {
    let review = reviews_update::mark_helpful(&context.db, review_id).await?;

    Ok(Json(review))
}
