use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use uuid::Uuid;

use crate::error::ErrorResponse;
use sitelog_core::models::Role;
use sitelog_core::{AccessScope, AppError};

/// Resolved caller identity, stored in request extensions by the session
/// middleware and extracted by handlers.
#[derive(Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub org_id: Uuid,
    pub role: Role,
    pub email: Option<String>,
    /// Upstream access token backing this session (needed for sign-out).
    pub access_token: String,
}

// Handlers record their arguments in spans; the token must never land in logs.
impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id)
            .field("org_id", &self.org_id)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl SessionContext {
    pub fn is_elevated(&self) -> bool {
        self.role.is_elevated()
    }

    /// The row-access capability for this caller.
    pub fn scope(&self) -> AccessScope {
        AccessScope::new(self.org_id, self.user_id, self.is_elevated())
    }

    /// Gate for mutation routes.
    pub fn require_elevated(&self) -> Result<(), AppError> {
        if self.is_elevated() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "This action requires an admin or manager role".to_string(),
            ))
        }
    }
}

// Extract directly from request parts so handlers can take SessionContext as
// an argument regardless of their other extractors.
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::new("Missing session context", "UNAUTHENTICATED")),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(role: Role) -> SessionContext {
        SessionContext {
            user_id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            role,
            email: None,
            access_token: "tok-secret".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let debug = format!("{:?}", context(Role::Admin));
        assert!(!debug.contains("tok-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_require_elevated() {
        assert!(context(Role::Admin).require_elevated().is_ok());
        assert!(context(Role::Manager).require_elevated().is_ok());
        assert!(context(Role::Standard).require_elevated().is_err());
        assert!(context(Role::Restricted).require_elevated().is_err());
    }

    #[test]
    fn test_scope_carries_elevation() {
        let ctx = context(Role::Standard);
        let scope = ctx.scope();
        assert_eq!(scope.org_id, ctx.org_id);
        assert_eq!(scope.creator_filter(), Some(ctx.user_id));

        let ctx = context(Role::Admin);
        assert_eq!(ctx.scope().creator_filter(), None);
    }
}
