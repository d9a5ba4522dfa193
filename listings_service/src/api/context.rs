use auth_service_client::AuthServiceClient;
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone, FromRef)]
pub struct ApiContext {
    /// Listings database connection.
    pub db: PgPool,
    pub config: Arc<Config>,
    /// Client for the external auth service, used for token introspection.
    pub auth: Arc<AuthServiceClient>,
}
