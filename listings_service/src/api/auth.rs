//! Authentication middleware. Tokens are never decoded here; the auth
//! service resolves them and we carry the resulting [`UserIdentity`] as a
//! request extension.

use auth_service_client::error::ClientError;
use auth_service_client::UserIdentity;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::context::ApiContext;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Invalid or expired access token")]
    InvalidToken,

    #[error("User account is deactivated")]
    InactiveUser,

    #[error("Auth service is currently unavailable")]
    ServiceUnavailable,

    #[error("An unknown error has occurred")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::InactiveUser => StatusCode::FORBIDDEN,
            AuthError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            tracing::error!(
                error = ?self,
                error_type = "AuthError",
                "Internal server error"
            );
        }

        (status_code, self.to_string()).into_response()
    }
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

async fn resolve_user(context: &ApiContext, token: &str) -> Result<UserIdentity, AuthError> {
    let user = context.auth.current_user(token).await.map_err(|e| match e {
        ClientError::InvalidToken => AuthError::InvalidToken,
        ClientError::Unavailable => AuthError::ServiceUnavailable,
        other => AuthError::InternalError(anyhow::Error::new(other)),
    })?;

    if !user.is_active {
        return Err(AuthError::InactiveUser);
    }
    Ok(user)
}

/// Rejects the request unless it carries a token the auth service accepts
/// for an active user.
pub async fn require_user(
    State(context): State<ApiContext>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers())
        .ok_or(AuthError::MissingToken)?
        .to_string();

    let user = resolve_user(&context, &token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Attaches the user when a valid token is present and otherwise lets the
/// request through anonymously. Used by endpoints whose response depends on
/// who is asking but that are open to everyone.
pub async fn attach_user(
    State(context): State<ApiContext>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()).map(str::to_string) {
        match resolve_user(&context, &token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "treating request as anonymous");
            }
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer abc.def.ghi"))),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert_eq!(bearer_token(&headers(None)), None);
        assert_eq!(bearer_token(&headers(Some("abc.def.ghi"))), None);
        assert_eq!(bearer_token(&headers(Some("Basic dXNlcjpwdw=="))), None);
        assert_eq!(bearer_token(&headers(Some("Bearer "))), None);
    }
}
