//! Shared constants.

/// Validity window for storage signed URLs, in seconds.
pub const SIGNED_URL_TTL_SECS: u64 = 3600;

/// Page size used when listing users from the auth collaborator.
pub const AUTH_LIST_USERS_PER_PAGE: usize = 1000;

/// Session cookie carrying the auth access token.
pub const SESSION_COOKIE: &str = "sitelog_session";
