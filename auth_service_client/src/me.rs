use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ClientError, ResponseExt};
use crate::AuthServiceClient;

/// The authenticated user as reported by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdentity {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub is_active: bool,
}

impl UserIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl AuthServiceClient {
    /// Resolve a bearer token to the user it was issued for.
    #[tracing::instrument(skip(self, access_token))]
    pub async fn current_user(&self, access_token: &str) -> Result<UserIdentity, ClientError> {
        let url = format!("{}/api/auth/me", self.url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_client_error()
            .await?;

        let user = response.json::<UserIdentity>().await.map_err(|e| {
            ClientError::Generic(anyhow::anyhow!(
                "unable to parse response from current_user: {}",
                e.to_string()
            ))
        })?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_user_identity() {
        let user: UserIdentity = serde_json::from_value(serde_json::json!({
            "id": "018f6f3a-0000-7000-8000-000000000001",
            "email": "host@example.com",
            "first_name": "Maya",
            "last_name": "Lindqvist",
            "avatar_url": null,
            "is_active": true
        }))
        .unwrap();

        assert_eq!(user.full_name(), "Maya Lindqvist");
        assert!(user.is_active);
        assert!(user.avatar_url.is_none());
    }
}
