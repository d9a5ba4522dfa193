//! Client for the external auth service. The listings service never
//! validates tokens itself; it hands the bearer token to the auth service's
//! introspection endpoint and gets back the user it belongs to.

use std::time::Duration;

pub mod error;
mod me;

pub use me::UserIdentity;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AuthServiceClient {
    url: String,
    client: reqwest::Client,
}

impl AuthServiceClient {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap();

        Self { url, client }
    }
}
