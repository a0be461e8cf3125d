use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Organization role.
///
/// Canonical representation of the caller's role. The product historically
/// carried both this enum and a bare `is_admin` boolean; rows still holding
/// only the boolean are mapped through [`Role::from_legacy`] when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Standard,
    Restricted,
}

impl Role {
    /// Whether this role grants organization-wide read/write.
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    /// Map the historical `is_admin` boolean onto the canonical enum.
    pub fn from_legacy(is_admin: bool) -> Self {
        if is_admin {
            Role::Admin
        } else {
            Role::Standard
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "standard" => Some(Role::Standard),
            "restricted" => Some(Role::Restricted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Standard => "standard",
            Role::Restricted => "restricted",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile row as stored. `role` is nullable: rows created before the enum
/// migration carry only `is_admin`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub org_id: Uuid,
    pub role: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn into_profile(self) -> Profile {
        let role = self
            .role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or_else(|| Role::from_legacy(self.is_admin));
        Profile {
            user_id: self.user_id,
            org_id: self.org_id,
            role,
            is_active: self.is_active,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        }
    }
}

/// Organization-scoped caller profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_id: Uuid,
    pub org_id: Uuid,
    pub role: Role,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_elevated(&self) -> bool {
        self.role.is_elevated()
    }
}

/// Profile entry on the users page, with metadata merged from the auth
/// collaborator when the service key is configured.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberView {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevated_roles() {
        assert!(Role::Admin.is_elevated());
        assert!(Role::Manager.is_elevated());
        assert!(!Role::Standard.is_elevated());
        assert!(!Role::Restricted.is_elevated());
    }

    #[test]
    fn test_legacy_mapping() {
        assert_eq!(Role::from_legacy(true), Role::Admin);
        assert_eq!(Role::from_legacy(false), Role::Standard);
    }

    #[test]
    fn test_row_prefers_enum_over_boolean() {
        let row = ProfileRow {
            user_id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            role: Some("manager".to_string()),
            is_admin: false,
            is_active: true,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        };
        assert_eq!(row.into_profile().role, Role::Manager);
    }

    #[test]
    fn test_row_falls_back_to_boolean() {
        let row = ProfileRow {
            user_id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            role: None,
            is_admin: true,
            is_active: true,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        };
        assert_eq!(row.into_profile().role, Role::Admin);
    }

    #[test]
    fn test_unknown_role_text_falls_back_to_boolean() {
        let row = ProfileRow {
            user_id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            role: Some("owner".to_string()),
            is_admin: false,
            is_active: true,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        };
        assert_eq!(row.into_profile().role, Role::Standard);
    }
}
