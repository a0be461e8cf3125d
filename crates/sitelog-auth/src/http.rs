//! HTTP implementation of [`AuthService`] against the hosted auth API.
//!
//! Two credentials are in play: the public anon key for password grants and
//! token lookups, and the privileged service key for invites and the user
//! directory. The service key is optional at startup; routes that need it
//! fail with `NotConfigured` instead of taking the process down.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{AuthError, AuthResult, AuthService, AuthSession, AuthUser, InviteMetadata};

#[derive(Clone)]
pub struct HttpAuthService {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: Uuid,
    email: Option<String>,
    last_sign_in_at: Option<DateTime<Utc>>,
}

impl From<UserPayload> for AuthUser {
    fn from(payload: UserPayload) -> Self {
        AuthUser {
            id: payload.id,
            email: payload.email,
            last_sign_in_at: payload.last_sign_in_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
    user: UserPayload,
}

#[derive(Debug, Deserialize)]
struct UserListPayload {
    users: Vec<UserPayload>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(alias = "msg", alias = "error_description", alias = "message")]
    error: Option<String>,
}

impl HttpAuthService {
    pub fn new(base_url: String, anon_key: String, service_key: Option<String>) -> Self {
        HttpAuthService {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            service_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn service_key(&self, operation: &str) -> AuthResult<&str> {
        self.service_key
            .as_deref()
            .ok_or_else(|| AuthError::NotConfigured(operation.to_string()))
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorPayload>().await {
            Ok(ErrorPayload { error: Some(msg) }) => msg,
            _ => format!("auth service returned {}", status),
        }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn get_user(&self, access_token: &str) -> AuthResult<Option<AuthUser>> {
        let response = self
            .client
            .get(self.url("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED
            || response.status() == reqwest::StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthError::Upstream(Self::error_message(response).await));
        }

        let payload: UserPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;
        Ok(Some(payload.into()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        let response = self
            .client
            .post(self.url("/token?grant_type=password"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST
            || response.status() == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::Rejected(Self::error_message(response).await));
        }
        if !response.status().is_success() {
            return Err(AuthError::Upstream(Self::error_message(response).await));
        }

        let payload: TokenPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;
        Ok(AuthSession {
            access_token: payload.access_token,
            user: payload.user.into(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.url("/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Upstream(Self::error_message(response).await));
        }
        Ok(())
    }

    async fn invite_by_email(
        &self,
        email: &str,
        metadata: &InviteMetadata,
    ) -> AuthResult<AuthUser> {
        let service_key = self.service_key("invite_by_email")?.to_string();
        let response = self
            .client
            .post(self.url("/invite"))
            .header("apikey", &service_key)
            .bearer_auth(&service_key)
            .json(&json!({ "email": email, "data": metadata }))
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY
            || response.status() == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(AuthError::Rejected(Self::error_message(response).await));
        }
        if !response.status().is_success() {
            return Err(AuthError::Upstream(Self::error_message(response).await));
        }

        let payload: UserPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;
        Ok(payload.into())
    }

    async fn list_users(&self, page: usize, per_page: usize) -> AuthResult<Vec<AuthUser>> {
        let service_key = self.service_key("list_users")?.to_string();
        let response = self
            .client
            .get(self.url("/admin/users"))
            .query(&[("page", page), ("per_page", per_page)])
            .header("apikey", &service_key)
            .bearer_auth(&service_key)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Upstream(Self::error_message(response).await));
        }

        let payload: UserListPayload = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;
        Ok(payload.users.into_iter().map(AuthUser::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitelog_core::models::Role;

    #[test]
    fn test_missing_service_key_is_not_configured() {
        let service = HttpAuthService::new(
            "http://localhost:9999".to_string(),
            "anon".to_string(),
            None,
        );
        assert!(matches!(
            service.service_key("invite_by_email"),
            Err(AuthError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let service = HttpAuthService::new(
            "http://localhost:9999/".to_string(),
            "anon".to_string(),
            None,
        );
        assert_eq!(service.url("/user"), "http://localhost:9999/auth/v1/user");
    }

    #[test]
    fn test_invite_metadata_serializes_role_as_text() {
        let metadata = InviteMetadata {
            org_id: Uuid::new_v4(),
            first_name: Some("Ada".to_string()),
            last_name: None,
            role: Role::Manager,
            is_active: true,
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value.get("role").unwrap(), "manager");
        assert_eq!(value.get("is_active").unwrap(), true);
    }
}
