//! JWT authentication middleware.
//!
//! Validates provider-issued bearer tokens and attaches the caller's
//! identity to the request. Two layers exist: `require_auth` for any
//! authenticated profile and `require_admin` for administrators.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use domain::models::Role;
use shared::jwt::TokenVerifier;

use crate::app::AppState;

/// Authenticated caller identity extracted from the JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Profile ID from the token subject claim.
    pub user_id: Uuid,
    /// Role from the token role claim.
    pub role: Role,
}

impl AuthUser {
    /// Validates a bearer token and returns the caller identity.
    pub fn validate(verifier: &TokenVerifier, token: &str) -> Result<Self, String> {
        let claims = verifier
            .verify(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let user_id = claims
            .subject_id()
            .map_err(|_| "Invalid profile ID in token".to_string())?;

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| "Unknown role in token".to_string())?;

        Ok(AuthUser { user_id, role })
    }
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

/// Middleware that requires a valid JWT.
///
/// The caller identity is stored in request extensions for downstream
/// handlers and extractors.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        return unauthorized_response("Missing or invalid Authorization header");
    };

    match AuthUser::validate(&state.verifier, token) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            unauthorized_response("Invalid or expired token")
        }
    }
}

/// Middleware that requires an administrator.
///
/// Runs after `require_auth`; rejects callers whose token carries a
/// non-admin role.
pub async fn require_admin(req: Request<Body>, next: Next) -> Response {
    match req.extensions().get::<AuthUser>() {
        Some(auth) if auth.role.is_admin() => next.run(req).await,
        Some(_) => forbidden_response("Administrator role required"),
        None => unauthorized_response("Missing authentication"),
    }
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Helper to create forbidden response.
fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}
