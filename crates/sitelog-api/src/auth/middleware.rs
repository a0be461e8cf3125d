//! Session resolution middleware.
//!
//! Every protected route runs through here: the session cookie is validated
//! against the auth collaborator, the caller's profile row is loaded, and the
//! resulting [`SessionContext`] is inserted into request extensions. Pages and
//! API routes share the same resolution; only the failure rendering differs
//! and that is decided by `HttpAppError`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::models::SessionContext;
use crate::error::{app_error_from_auth, HttpAppError};
use crate::state::AppState;
use sitelog_core::constants::SESSION_COOKIE;
use sitelog_core::AppError;

/// Pull the session token out of the Cookie header.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_session_cookie(request.headers()) else {
        return HttpAppError(AppError::Unauthenticated(
            "No active session".to_string(),
        ))
        .into_response();
    };

    let user = match state.auth.get_user(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpAppError(AppError::Unauthenticated(
                "Session is expired or invalid".to_string(),
            ))
            .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to verify session with auth service");
            return HttpAppError(app_error_from_auth(e)).into_response();
        }
    };

    let profile = match state.db.profiles.get_by_user_id(user.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpAppError(AppError::ProfileMissing(format!("user {}", user.id)))
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, user_id = %user.id, "Failed to load caller profile");
            return HttpAppError(e).into_response();
        }
    };

    if !profile.is_active {
        return HttpAppError(AppError::Forbidden(
            "This account has been deactivated".to_string(),
        ))
        .into_response();
    }

    let context = SessionContext {
        user_id: profile.user_id,
        org_id: profile.org_id,
        role: profile.role,
        email: user.email,
        access_token: token,
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_session_cookie() {
        let headers = headers("sitelog_session=tok123; theme=dark");
        assert_eq!(extract_session_cookie(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_extract_ignores_other_cookies() {
        let headers = headers("theme=dark; other=1");
        assert_eq!(extract_session_cookie(&headers), None);
    }

    #[test]
    fn test_extract_handles_whitespace_and_empty_value() {
        let with_value = headers("theme=dark;  sitelog_session=abc");
        assert_eq!(extract_session_cookie(&with_value), Some("abc".to_string()));

        let empty_value = headers("sitelog_session=");
        assert_eq!(extract_session_cookie(&empty_value), None);
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(extract_session_cookie(&HeaderMap::new()), None);
    }
}
