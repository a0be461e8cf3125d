//! Capability-scoped row access.
//!
//! Every read in the product is constrained to the caller's organization, and
//! non-elevated callers are further constrained to rows they created. The
//! predicate lives here, in one place, so a call site cannot forget the
//! organization filter.

use uuid::Uuid;

use crate::models::Profile;

/// The caller's access capability, derived from a resolved profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessScope {
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub elevated: bool,
}

impl AccessScope {
    pub fn new(org_id: Uuid, user_id: Uuid, elevated: bool) -> Self {
        Self {
            org_id,
            user_id,
            elevated,
        }
    }

    /// The `created_by` constraint, when one applies.
    pub fn creator_filter(&self) -> Option<Uuid> {
        (!self.elevated).then_some(self.user_id)
    }

    /// SQL predicate over `org_id`/`created_by`, with binds starting at
    /// `$start`. Callers bind `org_id` first and, when
    /// [`creator_filter`](Self::creator_filter) is `Some`, the user id next.
    pub fn predicate(&self, start: usize) -> String {
        match self.creator_filter() {
            Some(_) => format!("org_id = ${} AND created_by = ${}", start, start + 1),
            None => format!("org_id = ${}", start),
        }
    }

    /// Same predicate with columns qualified by a table alias, for joined
    /// queries where `org_id` alone would be ambiguous.
    pub fn qualified_predicate(&self, alias: &str, start: usize) -> String {
        match self.creator_filter() {
            Some(_) => format!(
                "{alias}.org_id = ${} AND {alias}.created_by = ${}",
                start,
                start + 1
            ),
            None => format!("{alias}.org_id = ${}", start),
        }
    }

    /// In-memory form of the same predicate, for re-checking a single row
    /// (e.g. photo ownership before a mutation).
    pub fn allows(&self, org_id: Uuid, created_by: Option<Uuid>) -> bool {
        if org_id != self.org_id {
            return false;
        }
        self.elevated || created_by == Some(self.user_id)
    }
}

impl From<&Profile> for AccessScope {
    fn from(profile: &Profile) -> Self {
        AccessScope::new(profile.org_id, profile.user_id, profile.is_elevated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_elevated_scope_is_org_only() {
        let (org, user) = ids();
        let scope = AccessScope::new(org, user, true);
        assert_eq!(scope.creator_filter(), None);
        assert_eq!(scope.predicate(1), "org_id = $1");
        // Elevated callers see rows created by anyone in the org.
        assert!(scope.allows(org, Some(Uuid::new_v4())));
        assert!(scope.allows(org, None));
    }

    #[test]
    fn test_restricted_scope_adds_creator_filter() {
        let (org, user) = ids();
        let scope = AccessScope::new(org, user, false);
        assert_eq!(scope.creator_filter(), Some(user));
        assert_eq!(scope.predicate(2), "org_id = $2 AND created_by = $3");
        assert_eq!(
            scope.qualified_predicate("p", 1),
            "p.org_id = $1 AND p.created_by = $2"
        );
        assert!(scope.allows(org, Some(user)));
        assert!(!scope.allows(org, Some(Uuid::new_v4())));
        assert!(!scope.allows(org, None));
    }

    #[test]
    fn test_scope_never_crosses_organizations() {
        let (org, user) = ids();
        let other_org = Uuid::new_v4();
        for elevated in [true, false] {
            let scope = AccessScope::new(org, user, elevated);
            assert!(!scope.allows(other_org, Some(user)));
        }
    }
}
