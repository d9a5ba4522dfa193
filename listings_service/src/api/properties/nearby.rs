use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::context::ApiContext;
use listings_db_client::error::ListingsDatabaseError;
use listings_db_client::properties::nearby as properties_nearby;
use models_listings::api::{NearbyProperty, NearbyQuery};

#[derive(Debug, Error)]
pub enum NearbyPropertiesErr {
    #[error("Database error: {0}")]
    DatabaseError(#[from] ListingsDatabaseError),
    #[error("{0}")]
    InvalidQuery(String),
}

impl IntoResponse for NearbyPropertiesErr {
    fn into_response(self) -> Response {
        let status_code = match &self {
            NearbyPropertiesErr::DatabaseError(e) if e.is_unavailable() => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            NearbyPropertiesErr::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            NearbyPropertiesErr::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "NearbyPropertiesErr",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

/// List active properties within a radius of a point, closest first
#[utoipa::path(
    get,
    path = "/properties/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Nearby properties with distances", body = [NearbyProperty]),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Properties"
)]
#[tracing::instrument(skip(context))]
pub async fn nearby_properties(
    State(context): State<ApiContext>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyProperty>>, NearbyPropertiesErr> {
    query
        .validate()
        .map_err(|e| NearbyPropertiesErr::InvalidQuery(e.to_string()))?;

    let nearby = properties_nearby::nearby_properties(
        &context.db,
        query.lat,
        query.lng,
        query.radius_km,
        query.limit,
    )
    .await?;

    tracing::debug!(count = nearby.len(), "resolved nearby properties");

    Ok(Json(nearby))
}
