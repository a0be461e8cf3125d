//! Sitelog Auth Library
//!
//! Interface to the hosted authentication collaborator. The product does not
//! own identities: sessions, password grants, invites, and the user directory
//! all live upstream and are consumed through the [`AuthService`] trait. The
//! HTTP implementation lives in [`http`].

pub mod http;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use sitelog_core::models::Role;

pub use http::HttpAuthService;

/// Auth collaborator errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credentials or token were rejected upstream.
    #[error("Auth rejected: {0}")]
    Rejected(String),

    /// The privileged service key is required but not configured.
    #[error("Auth service key not configured: {0}")]
    NotConfigured(String),

    /// Transport or unexpected upstream failure.
    #[error("Auth upstream error: {0}")]
    Upstream(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Identity as known to the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// An upstream session produced by a password grant.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Application metadata attached to an invite; the upstream provisioning hook
/// turns it into the profile row.
#[derive(Debug, Clone, Serialize)]
pub struct InviteMetadata {
    pub org_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

/// Hosted authentication service interface.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve an access token to its user. `Ok(None)` means the token is
    /// expired or unknown (not an upstream failure).
    async fn get_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>>;

    /// Password grant.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<AuthSession>;

    /// Revoke a session upstream. Best effort; callers clear the cookie
    /// regardless.
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;

    /// Invite a user by email. Requires the privileged service key.
    async fn invite_by_email(&self, email: &str, metadata: &InviteMetadata) -> AuthResult<AuthUser>;

    /// List users in the directory. Requires the privileged service key.
    async fn list_users(&self, page: usize, per_page: usize) -> AuthResult<Vec<AuthUser>>;
}
