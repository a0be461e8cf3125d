//! Tagged per-item results for batch operations.
//!
//! Group-member inserts and user invites are processed independently: one
//! failure never aborts the rest, and the per-item outcomes are preserved all
//! the way to the API response (HTTP 207 when any item failed).

use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of one item in a batch.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchOutcome {
    /// The item this outcome refers to (an email, a member id, ...).
    pub item: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn ok(item: impl Into<String>) -> Self {
        BatchOutcome {
            item: item.into(),
            ok: true,
            error: None,
        }
    }

    pub fn err(item: impl Into<String>, reason: impl Into<String>) -> Self {
        BatchOutcome {
            item: item.into(),
            ok: false,
            error: Some(reason.into()),
        }
    }
}

/// Aggregated batch result.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchReport {
    pub results: Vec<BatchOutcome>,
    pub failed: usize,
}

impl BatchReport {
    pub fn new(results: Vec<BatchOutcome>) -> Self {
        let failed = results.iter().filter(|r| !r.ok).count();
        BatchReport { results, failed }
    }

    pub fn any_failed(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_failures() {
        let report = BatchReport::new(vec![
            BatchOutcome::ok("a@example.com"),
            BatchOutcome::err("b@example.com", "duplicate"),
            BatchOutcome::ok("c@example.com"),
        ]);
        assert_eq!(report.failed, 1);
        assert!(report.any_failed());
    }

    #[test]
    fn test_all_ok_report() {
        let report = BatchReport::new(vec![BatchOutcome::ok("u1")]);
        assert_eq!(report.failed, 0);
        assert!(!report.any_failed());
    }

    #[test]
    fn test_error_field_omitted_when_ok() {
        let json = serde_json::to_value(BatchOutcome::ok("u1")).unwrap();
        assert!(json.get("error").is_none());
        let json = serde_json::to_value(BatchOutcome::err("u2", "boom")).unwrap();
        assert_eq!(json.get("error").unwrap(), "boom");
    }
}
