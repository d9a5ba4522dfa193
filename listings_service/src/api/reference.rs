//! Read-only reference catalogs: amenities and safety features.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::context::ApiContext;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::reference as reference_db;
use models_listings::db::{Amenity, SafetyFeature};

#[derive(Debug, Error)]
pub enum ReferenceErr {
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
}

impl IntoResponse for ReferenceErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ReferenceErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ReferenceErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!(
            error = ?self,
            error_type = "ReferenceErr",
            "Internal server error"
        );
        (status_code, self.to_string()).into_response()
    }
}

/// List the amenity catalog
#[utoipa::path(
    get,
    path = "/amenities",
    responses(
        (status = 200, description = "All amenities, grouped by category", body = [Amenity]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reference"
)]
#[tracing::instrument(skip(context))]
pub async fn list_amenities(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<Amenity>>, ReferenceErr> {
    let amenities = reference_db::list_amenities(&context.db).await?;
    Ok(Json(amenities))
}

/// List the safety feature catalog
#[utoipa::path(
    get,
    path = "/safety-features",
    responses(
        (status = 200, description = "All safety features", body = [SafetyFeature]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reference"
)]
#[tracing::instrument(skip(context))]
pub async fn list_safety_features(
    State(context): State<ApiContext>,
) -> Result<Json<Vec<SafetyFeature>>, ReferenceErr> {
    let features = reference_db::list_safety_features(&context.db).await?;
    Ok(Json(features))
}
