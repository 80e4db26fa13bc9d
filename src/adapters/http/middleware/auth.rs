//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `session_middleware` - validates Bearer tokens and injects the user
//!   into request extensions
//! - `require_auth` - layer that rejects unauthenticated requests, unless
//!   authentication is disabled entirely
//! - `OptionalAuth` - extractor for handlers that scope behavior by user
//!
//! The middleware uses the `SessionStore` port, so it does not care how
//! sessions are stored.
//!
//! ```text
//! Request → session_middleware → injects AuthenticatedUser into extensions
//!                                         ↓
//!                                Handler → OptionalAuth extractor reads it
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::SessionStore;

use super::super::error::ErrorResponse;

/// Shared auth context for the middleware layers.
#[derive(Clone)]
pub struct AuthContext {
    /// Whether session authentication is enabled at all. When disabled,
    /// every request runs anonymously and `require_auth` is a no-op.
    pub enabled: bool,
    pub sessions: Arc<dyn SessionStore>,
}

/// Validates a Bearer session token when one is present.
///
/// 1. Extracts the token from the `Authorization: Bearer` header
/// 2. Validates it through the `SessionStore` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues without injecting
/// 5. On invalid token, returns 401
pub async fn session_middleware(
    State(ctx): State<AuthContext>,
    mut request: Request,
    next: Next,
) -> Response {
    if !ctx.enabled {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    match token {
        Some(token) => match ctx.sessions.validate(&token).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                next.run(request).await
            }
            Err(e) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized(e.to_string())),
            )
                .into_response(),
        },
        None => next.run(request).await,
    }
}

/// Rejects requests with no authenticated user, unless authentication is
/// disabled in configuration.
pub async fn require_auth(
    State(ctx): State<AuthContext>,
    request: Request,
    next: Next,
) -> Response {
    if ctx.enabled && request.extensions().get::<AuthenticatedUser>().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Authentication required")),
        )
            .into_response();
    }
    next.run(request).await
}

/// Extractor for optional authentication.
///
/// Returns `None` when no valid session was presented (or authentication
/// is disabled), `Some(user)` otherwise. Handlers use the `None` case as
/// the anonymous/global scope.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "alice")
    }

    #[tokio::test]
    async fn optional_auth_returns_some_when_present() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());

        let (mut parts, _body) = request.into_parts();

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn optional_auth_returns_none_when_absent() {
        use axum::extract::FromRequestParts;
        use axum::http::Request;

        let request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let OptionalAuth(user) = OptionalAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn bearer_token_extraction() {
        let header_value = "Bearer my-secret-token";
        assert_eq!(header_value.strip_prefix("Bearer "), Some("my-secret-token"));

        let header_value = "my-secret-token";
        assert_eq!(header_value.strip_prefix("Bearer "), None);
    }

    #[test]
    fn auth_context_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthContext>();
    }
}
