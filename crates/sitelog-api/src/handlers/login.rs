//! Login and logout.
//!
//! Login delegates the password grant to the auth collaborator, then requires
//! an active profile before the session cookie is set; a session without a
//! profile is discarded upstream rather than left dangling.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::middleware::extract_session_cookie;
use crate::error::{app_error_from_auth, ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use sitelog_core::constants::SESSION_COOKIE;
use sitelog_core::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
}

/// Build the session cookie. HttpOnly always; Secure only in production so
/// local development over plain HTTP keeps working.
fn session_cookie(token: &str, ttl_seconds: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, ttl_seconds
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account deactivated", body = ErrorResponse),
        (status = 404, description = "No profile for this account", body = ErrorResponse),
        (status = 500, description = "Auth service unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".to_string()).into());
    }

    let session = state
        .auth
        .sign_in_with_password(&email, &request.password)
        .await
        .map_err(app_error_from_auth)?;

    let profile = state
        .db
        .profiles
        .get_by_user_id(session.user.id)
        .await?;

    let profile = match profile {
        Some(profile) => profile,
        None => {
            discard_session(&state, &session.access_token).await;
            return Err(AppError::ProfileMissing(format!("user {}", session.user.id)).into());
        }
    };

    if !profile.is_active {
        discard_session(&state, &session.access_token).await;
        return Err(AppError::Forbidden("This account has been deactivated".to_string()).into());
    }

    tracing::info!(user_id = %profile.user_id, org_id = %profile.org_id, role = %profile.role, "Login successful");

    let cookie = session_cookie(
        &session.access_token,
        state.config.session_ttl_seconds,
        state.is_production,
    );
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, cookie)],
        Json(LoginResponse { success: true }),
    ))
}

/// Best-effort upstream sign-out for a session we refuse to keep.
async fn discard_session(state: &AppState, access_token: &str) {
    if let Err(e) = state.auth.sign_out(access_token).await {
        tracing::warn!(error = %e, "Failed to discard rejected session upstream");
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cleared", body = LoginResponse)
    )
)]
#[tracing::instrument(skip(state, headers), fields(operation = "logout"))]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpAppError> {
    if let Some(token) = extract_session_cookie(&headers) {
        discard_session(&state, &token).await;
    }

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, clear_session_cookie(state.is_production))],
        Json(LoginResponse { success: true }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("tok", 3600, false);
        assert!(cookie.starts_with("sitelog_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let cookie = session_cookie("tok", 3600, true);
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie(false);
        assert!(cookie.starts_with("sitelog_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
