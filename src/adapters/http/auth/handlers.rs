//! HTTP handlers for authentication endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::auth::PasswordService;
use crate::domain::foundation::Timestamp;
use crate::domain::user::User;
use crate::ports::{SessionStore, UserRepository};

use super::super::error::{domain_error_response, ErrorResponse};
use super::super::middleware::OptionalAuth;
use super::dto::{
    AuthStatusResponse, ChangePasswordRequest, LoginRequest, MessageResponse, SessionResponse,
    SetupRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AuthHandlers {
    enabled: bool,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    passwords: PasswordService,
}

impl AuthHandlers {
    pub fn new(
        enabled: bool,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            enabled,
            users,
            sessions,
            passwords,
        }
    }
}

fn auth_disabled() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request("Authentication is not enabled")),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/auth/status - Authentication state
pub async fn get_status(
    State(handlers): State<AuthHandlers>,
    OptionalAuth(user): OptionalAuth,
) -> Response {
    if !handlers.enabled {
        return (
            StatusCode::OK,
            Json(AuthStatusResponse {
                auth_enabled: false,
                authenticated: true,
                setup_required: false,
                username: None,
            }),
        )
            .into_response();
    }

    let count = match handlers.users.count().await {
        Ok(count) => count,
        Err(e) => return domain_error_response(e),
    };

    (
        StatusCode::OK,
        Json(AuthStatusResponse {
            auth_enabled: true,
            authenticated: user.is_some(),
            setup_required: count == 0,
            username: user.map(|u| u.username),
        }),
    )
        .into_response()
}

/// POST /api/auth/setup - Create the first (admin) user
pub async fn setup(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SetupRequest>,
) -> Response {
    if !handlers.enabled {
        return auth_disabled();
    }

    if req.username.trim().len() < 3 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Username must be at least 3 characters",
            )),
        )
            .into_response();
    }
    if req.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Password must be at least 8 characters",
            )),
        )
            .into_response();
    }

    match handlers.users.count().await {
        Ok(0) => {}
        Ok(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "SETUP_ALREADY_COMPLETED",
                    "Setup already completed",
                )),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    }

    let hash = match handlers.passwords.hash(&req.password) {
        Ok(hash) => hash,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    };

    let user = match User::new(req.username, hash) {
        Ok(user) => user,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    if let Err(e) = handlers.users.insert(&user).await {
        return domain_error_response(e);
    }

    let token = match handlers.sessions.issue(&user).await {
        Ok(token) => token,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    };

    tracing::info!(username = %user.username, "initial admin user created");
    (
        StatusCode::OK,
        Json(SessionResponse {
            success: true,
            username: user.username,
            token,
        }),
    )
        .into_response()
}

/// POST /api/auth/login - Authenticate and open a session
pub async fn login(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<LoginRequest>,
) -> Response {
    if !handlers.enabled {
        return auth_disabled();
    }

    let username = req.username.trim();
    let user = match handlers.users.find_by_username(username).await {
        Ok(user) => user,
        Err(e) => return domain_error_response(e),
    };

    // Unknown users get a dummy comparison so response timing does not
    // reveal which usernames exist.
    let valid = handlers
        .passwords
        .verify_or_dummy(&req.password, user.as_ref().map(|u| u.password_hash.as_str()));

    let user = match (user, valid) {
        (Some(user), true) => user,
        _ => {
            tracing::debug!(username, "failed login attempt");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized("Invalid credentials")),
            )
                .into_response();
        }
    };

    if let Err(e) = handlers
        .users
        .touch_last_login(&user.id, Timestamp::now())
        .await
    {
        return domain_error_response(e);
    }

    let token = match handlers.sessions.issue(&user).await {
        Ok(token) => token,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    };

    tracing::info!(username = %user.username, "user logged in");
    (
        StatusCode::OK,
        Json(SessionResponse {
            success: true,
            username: user.username,
            token,
        }),
    )
        .into_response()
}

/// POST /api/auth/logout - Revoke the presented session
pub async fn logout(
    State(handlers): State<AuthHandlers>,
    OptionalAuth(user): OptionalAuth,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        handlers.sessions.revoke(token).await;
    }

    if let Some(user) = user {
        tracing::info!(username = %user.username, "user logged out");
    }

    (
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
        .into_response()
}

/// POST /api/auth/change-password - Rotate the current user's password
pub async fn change_password(
    State(handlers): State<AuthHandlers>,
    OptionalAuth(user): OptionalAuth,
    Json(req): Json<ChangePasswordRequest>,
) -> Response {
    if !handlers.enabled {
        return auth_disabled();
    }

    let authenticated = match user {
        Some(user) => user,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized("Not authenticated")),
            )
                .into_response()
        }
    };

    if req.new_password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Password must be at least 8 characters",
            )),
        )
            .into_response();
    }

    let user = match handlers.users.find_by_id(&authenticated.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("User", &authenticated.username)),
            )
                .into_response()
        }
        Err(e) => return domain_error_response(e),
    };

    if !handlers
        .passwords
        .verify(&req.current_password, &user.password_hash)
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Current password is incorrect")),
        )
            .into_response();
    }

    let hash = match handlers.passwords.hash(&req.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    };

    if let Err(e) = handlers.users.update_password(&user.id, &hash).await {
        return domain_error_response(e);
    }

    tracing::info!(username = %user.username, "password changed");
    (
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            message: "Password changed successfully".to_string(),
        }),
    )
        .into_response()
}
