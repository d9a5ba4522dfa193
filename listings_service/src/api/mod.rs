use anyhow::Context;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::context::ApiContext;

pub mod auth;
pub mod context;
mod health;
pub mod properties;
pub mod reference;
pub mod reviews;
pub mod swagger;

pub async fn setup_and_serve(state: ApiContext) -> anyhow::Result<()> {
    let port = state.config.port;
    let env = state.config.environment;
    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .merge(health::router())
        .layer(CorsLayer::permissive());

    let bind_address = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to address {}", bind_address))?;

    tracing::info!(
        "listings service is up and running with environment {:?} on port {}",
        &env,
        &port
    );

    axum::serve(listener, app.into_make_service())
        .await
        .context("error running axum server")
}

pub fn api_router(state: ApiContext) -> Router {
    // Open endpoints: browsing, search and the reference catalogs.
    let public = Router::new()
        .route("/properties", get(properties::list::list_properties))
        .route("/properties/search", get(properties::search::search_properties))
        .route("/properties/featured", get(properties::featured::featured_properties))
        .route("/properties/nearby", get(properties::nearby::nearby_properties))
        .route(
            "/properties/:property_id/reviews",
            get(reviews::list::list_reviews),
        )
        .route(
            "/properties/:property_id/availability",
            get(properties::availability::list_availability),
        )
        .route(
            "/reviews/:review_id/helpful",
            post(reviews::helpful::mark_review_helpful),
        )
        .route("/amenities", get(reference::list_amenities))
        .route("/safety-features", get(reference::list_safety_features))
        .route("/api-doc/openapi.json", get(swagger::openapi_json));

    // The detail view is open but shows inactive listings to their host, so
    // it resolves the caller when a token is present.
    let detail = Router::new()
        .route("/properties/:property_id", get(properties::get::get_property))
        .route_layer(from_fn_with_state(state.clone(), auth::attach_user));

    // Everything that creates or mutates requires an authenticated user.
    let authed = Router::new()
        .route("/properties", post(properties::create::create_property))
        .route(
            "/properties/:property_id",
            // PATCH is an alias for PUT; the update is partial either way.
            put(properties::update::update_property)
                .patch(properties::update::update_property)
                .delete(properties::delete::delete_property),
        )
        .route("/my/properties", get(properties::mine::my_properties))
        .route(
            "/properties/:property_id/images",
            post(properties::images::add_image),
        )
        .route(
            "/properties/:property_id/images/:image_id",
            put(properties::images::update_image).delete(properties::images::delete_image),
        )
        .route(
            "/properties/:property_id/availability",
            post(properties::availability::add_availability),
        )
        .route(
            "/properties/:property_id/availability/:availability_id",
            delete(properties::availability::delete_availability),
        )
        .route(
            "/properties/:property_id/reviews",
            post(reviews::create::create_review),
        )
        .route(
            "/reviews/:review_id",
            put(reviews::update::update_review).delete(reviews::delete::delete_review),
        )
        .route_layer(from_fn_with_state(state.clone(), auth::require_user));

    Router::new()
        .merge(public)
        .merge(detail)
        .merge(authed)
        .with_state(state)
}
