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
use listings_db_client::properties::get as properties_get;
use listings_db_client::reviews::{get as reviews_get, insert as reviews_insert};
use models_listings::api::{CreateReviewRequest, ReviewResponse};

#[derive(Debug, Error)]
pub enum CreateReviewErr {
    #[error("Database error: {0}")]
    DatabaseError(ListingsDatabaseError),
    #[error("Property not found")]
    PropertyNotFound,
    #[error("{0}")]
    Forbidden(access::AccessError),
    #[error("You have already reviewed this property")]
    AlreadyReviewed,
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ListingsDatabaseError> for CreateReviewErr {
    fn from(err: ListingsDatabaseError) -> Self {
        match err {
            ListingsDatabaseError::PropertyNotFound(_) => CreateReviewErr::PropertyNotFound,
            ListingsDatabaseError::DuplicateReview { .. } => CreateReviewErr::AlreadyReviewed,
            other => CreateReviewErr::DatabaseError(other),
        }
    }
}

impl IntoResponse for CreateReviewErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            CreateReviewErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            CreateReviewErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CreateReviewErr::PropertyNotFound => StatusCode::NOT_FOUND,
            CreateReviewErr::Forbidden(_) => StatusCode::FORBIDDEN,
            CreateReviewErr::AlreadyReviewed => StatusCode::CONFLICT,
            CreateReviewErr::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "CreateReviewErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// Review a property. One review per user per property; hosts cannot review
/// their own listings.
#[utoipa::path(
    post,
    path = "/properties/{property_id}/reviews",
    params(("property_id" = Uuid, Path, description = "Property id")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Hosts cannot review their own listings"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Caller already reviewed this property"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
#[tracing::instrument(skip(context, user, request), fields(user_id = %user.id))]
pub async fn create_review(
    State(context): State<ApiContext>,
    Extension(user): Extension<UserIdentity>,
    Path(property_id): Path<Uuid>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), CreateReviewErr> {
    if let Err(err) = request.validate() {
        tracing::info!(error = %err, "review validation failed");
        return Err(CreateReviewErr::InvalidRequest(err.to_string()));
    }

    let property = properties_get::get_property(&context.db, property_id).await?;
    if !property.is_active {
        return Err(CreateReviewErr::PropertyNotFound);
    }
    access::ensure_can_review(&property, user.id).map_err(CreateReviewErr::Forbidden)?;

    // Friendly check first; the unique constraint still catches races.
    if reviews_get::has_reviewed(&context.db, property_id, user.id).await? {
        return Err(CreateReviewErr::AlreadyReviewed);
    }

    let review = reviews_insert::create_review(&context.db, property_id, user.id, &request)
        .await
        .inspect_err(|e| {
            tracing::error!(
                error = ?e,
                property_id = %property_id,
                "failed to create review in database"
            );
        })?;

    tracing::info!(
        review_id = %review.id,
        property_id = %property_id,
        rating = review.rating,
        "successfully created review"
    );

    Ok((StatusCode::CREATED, Json(review)))
}
