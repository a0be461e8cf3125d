//! Organization users: directory view model and invites.
//!
//! Invites accept a single entry or a batch; entries are normalized first and
//! then processed independently so one upstream failure never aborts the
//! rest. The per-email outcomes travel to the response unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::SessionContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use sitelog_auth::{AuthError, AuthUser, InviteMetadata};
use sitelog_core::constants::AUTH_LIST_USERS_PER_PAGE;
use sitelog_core::models::{MemberView, Role};
use sitelog_core::{AppError, BatchOutcome, BatchReport};

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "pages",
    responses(
        (status = 200, description = "Organization members", body = [MemberView]),
        (status = 401, description = "No active session", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "users_page")
)]
pub async fn users_page(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let profiles = state.db.profiles.list_by_org(ctx.org_id).await?;

    // Merge emails and last-sign-in timestamps from the auth directory.
    // A missing service key or an upstream failure hides the metadata but
    // never fails the page.
    let mut directory: HashMap<Uuid, AuthUser> = HashMap::new();
    match state.auth.list_users(1, AUTH_LIST_USERS_PER_PAGE).await {
        Ok(users) => {
            directory = users.into_iter().map(|u| (u.id, u)).collect();
        }
        Err(AuthError::NotConfigured(_)) => {
            tracing::warn!("AUTH_SERVICE_KEY not configured; user emails will be hidden");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list auth users; user emails will be hidden");
        }
    }

    let members: Vec<MemberView> = profiles
        .into_iter()
        .map(|profile| {
            let meta = directory.get(&profile.user_id);
            MemberView {
                user_id: profile.user_id,
                first_name: profile.first_name,
                last_name: profile.last_name,
                role: profile.role,
                is_active: profile.is_active,
                created_at: profile.created_at,
                email: meta.and_then(|m| m.email.clone()),
                last_sign_in_at: meta.and_then(|m| m.last_sign_in_at),
            }
        })
        .collect();

    Ok(Json(members))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InviteEntry {
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A single invite object or a batch.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum InviteUsersRequest {
    Batch { invites: Vec<InviteEntry> },
    Single(InviteEntry),
}

impl InviteUsersRequest {
    fn into_entries(self) -> Vec<InviteEntry> {
        match self {
            InviteUsersRequest::Batch { invites } => invites,
            InviteUsersRequest::Single(entry) => vec![entry],
        }
    }
}

/// Trim and lowercase emails, trim names, drop entries left without an email.
fn normalize_invites(entries: Vec<InviteEntry>) -> Vec<InviteEntry> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let email = entry.email.trim().to_lowercase();
            if email.is_empty() {
                return None;
            }
            Some(InviteEntry {
                email,
                first_name: entry
                    .first_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
                last_name: entry
                    .last_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
                role: entry.role,
                is_active: entry.is_active,
            })
        })
        .collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InviteUsersResponse {
    pub success: bool,
    pub report: BatchReport,
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "users",
    request_body = InviteUsersRequest,
    responses(
        (status = 200, description = "All invites succeeded", body = InviteUsersResponse),
        (status = 207, description = "Some invites failed", body = InviteUsersResponse),
        (status = 400, description = "No valid invite entries", body = ErrorResponse),
        (status = 403, description = "Caller is not elevated", body = ErrorResponse),
        (status = 500, description = "Service key missing or auth service unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request),
    fields(org_id = %ctx.org_id, user_id = %ctx.user_id, operation = "invite_users")
)]
pub async fn invite_users(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    ValidatedJson(request): ValidatedJson<InviteUsersRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    ctx.require_elevated()?;

    let entries = normalize_invites(request.into_entries());
    if entries.is_empty() {
        return Err(AppError::Validation("At least one email is required".to_string()).into());
    }

    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        let metadata = InviteMetadata {
            org_id: ctx.org_id,
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            role: entry.role.unwrap_or(Role::Standard),
            is_active: entry.is_active.unwrap_or(true),
        };

        match state.auth.invite_by_email(&entry.email, &metadata).await {
            Ok(_) => outcomes.push(BatchOutcome::ok(entry.email)),
            // The whole route depends on the service key; without it nothing
            // can be invited, so surface a config error instead of N failures.
            Err(AuthError::NotConfigured(op)) => {
                return Err(AppError::Internal(format!(
                    "Auth service key not configured ({})",
                    op
                ))
                .into());
            }
            Err(e) => {
                tracing::error!(error = %e, email = %entry.email, "Invite failed");
                outcomes.push(BatchOutcome::err(entry.email, e.to_string()));
            }
        }
    }

    let report = BatchReport::new(outcomes);
    let status = if report.any_failed() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(InviteUsersResponse {
            success: !report.any_failed(),
            report,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(email: &str) -> InviteEntry {
        InviteEntry {
            email: email.to_string(),
            first_name: None,
            last_name: None,
            role: None,
            is_active: None,
        }
    }

    #[test]
    fn test_normalize_drops_empty_emails() {
        let entries = normalize_invites(vec![entry("a@x.com"), entry(""), entry("   ")]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].email, "a@x.com");
    }

    #[test]
    fn test_normalize_lowercases_and_trims() {
        let entries = normalize_invites(vec![entry("  Admin@Example.COM ")]);
        assert_eq!(entries[0].email, "admin@example.com");
    }

    #[test]
    fn test_normalize_trims_names() {
        let mut raw = entry("a@x.com");
        raw.first_name = Some("  Ada ".to_string());
        raw.last_name = Some("   ".to_string());
        let entries = normalize_invites(vec![raw]);
        assert_eq!(entries[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(entries[0].last_name, None);
    }

    #[test]
    fn test_single_body_deserializes() {
        let body: InviteUsersRequest =
            serde_json::from_str(r#"{"email": "a@x.com", "role": "manager"}"#).unwrap();
        let entries = body.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, Some(Role::Manager));
    }

    #[test]
    fn test_batch_body_deserializes() {
        let body: InviteUsersRequest =
            serde_json::from_str(r#"{"invites": [{"email": "a@x.com"}, {"email": "b@x.com"}]}"#)
                .unwrap();
        assert_eq!(body.into_entries().len(), 2);
    }
}
