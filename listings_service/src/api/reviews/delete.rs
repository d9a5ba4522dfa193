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
use listings_db_client::reviews::{delete as reviews_delete, get as reviews_get};

#[derive(Debug, Error)]
pub enum DeleteReviewErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Review not found")]
    NotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
}

impl From<ListingsDatabaseError> for DeleteReviewErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::ReviewNotFound(_) => DeleteReviewErr::NotFound,
            other => DeleteReviewErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for DeleteReviewErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            DeleteReviewErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DeleteReviewErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DeleteReviewErr::NotFound => StatusCode::NOT_FOUND,
            DeleteReviewErr::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "DeleteReviewErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Delete a review written by the caller
#[utoipa::path(
    delete,
    path = "/reviews/{review_id}",
    params(("review_id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not the review's author"),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[tracing::instrument(skip(context, user), fields(user_id = %user.id))]
pub async fn delete_review(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, DeleteReviewErr> {
    let review = reviews_get::get_review(&context.db, review_id).await?;
    access::ensure_review_author(&review, user.id).map_err(DeleteReviewErr::Forbidden)?;

    reviews_delete::delete_review(&context.db, review_id)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                review_id = %review_id,
                "failed to delete review in database"
            );
        })?;

    tracing::info!(review_id = %review_id, "successfully deleted review");

    Ok(StatusCode::NO_CONTENT)
}
