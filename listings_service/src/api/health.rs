use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::constants::SERVICE_NAME;

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

#[tracing::instrument]
async fn health() -> Result<Json<Value>, StatusCode> {
    tracing::debug!("health check requested");

    let response = Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }));

    tracing::trace!("health check response ready");

    Ok(response)
}
