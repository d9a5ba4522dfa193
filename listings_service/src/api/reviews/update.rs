use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::api::context::ApiContext;
use crate::domain::access;
use auth_service_client::UserIdentity;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::reviews::{get as reviews_get, update as reviews_update};
use models_listings::api::{ReviewResponse, UpdateReviewRequest};

#[derive(Debug, Error)]
pub enum UpdateReviewErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Review not found")]
    NotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ListingsDatabaseError> for UpdateReviewErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::ReviewNotFound(_) => UpdateReviewErr::NotFound,
            other => UpdateReviewErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for UpdateReviewErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            UpdateReviewErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            UpdateReviewErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UpdateReviewErr::NotFound => StatusCode::NOT_FOUND,
            UpdateReviewErr::Forbidden(_) => StatusCode::FORBIDDEN,
            UpdateReviewErr::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "UpdateReviewErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Update a review written by the caller
#[utoipa::path(
    put,
    path = "/reviews/{review_id}",
    params(("review_id" = Uuid, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Updated review", body = ReviewResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not the review's author"),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[tracing::instrument(skip(context, user, request), fields(user_id = %user.id))]
pub async fn update_review(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(review_id): Path<Uuid>,
    Json(request): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, UpdateReviewErr> {
    if let Err(err) = request.validate() {
        tracing::info!(error = %err, "review update validation failed");
        return Err(UpdateReviewErr::InvalidRequest(err.to_string()));
    }

    let review = reviews_get::get_review(&context.db, review_id).await?;
    access::ensure_review_author(&review, user.id).map_err(UpdateReviewErr::Forbidden)?;

    let review = reviews_update::update_review(&context.db, review_id, &request)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                review_id = %review_id,
                "failed to update review in database"
            );
        })?;

    Ok(Json(review))
}
