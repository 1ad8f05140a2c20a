//! Authorization context for authenticated users

use uuid::Uuid;

use crate::types::{AuthIdentity, RoleName};

/// Represents an authenticated user context.
///
/// `roles` is resolved fresh from the `role_user` join on every request;
/// `token_id` identifies the exact access token used, so logout can revoke
/// it without touching the user's other tokens.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
    pub roles: Vec<RoleName>,
    pub token_id: Uuid,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity, roles: Vec<RoleName>, token_id: Uuid) -> Self {
        Self {
            user,
            roles,
            token_id,
        }
    }

    /// Membership test against the freshly resolved role set
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Check if user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.has_role(RoleName::Admin)
    }

    /// Resolve the role that selects a multi-role user's view.
    ///
    /// Checked in priority order candidate > employer > admin; this order
    /// determines which application-list view a multi-role user sees.
    pub fn primary_role(&self) -> Option<RoleName> {
        [RoleName::Candidate, RoleName::Employer, RoleName::Admin]
            .into_iter()
            .find(|role| self.has_role(*role))
    }

    /// Role names as strings, for response payloads
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.to_string()).collect()
    }
}

/// Shared ownership predicate for mutating endpoints.
///
/// The caller is authorized when their id appears in `owner_ids` (the
/// resource-specific owner set: job owner, application owner, or both) or
/// when they hold the admin role.
pub fn is_owner_or_admin(ctx: &AuthContext, owner_ids: &[Uuid]) -> bool {
    owner_ids.contains(&ctx.user.id) || ctx.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_identity() -> AuthIdentity {
        AuthIdentity {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ctx_with_roles(roles: Vec<RoleName>) -> AuthContext {
        AuthContext::new(create_test_identity(), roles, Uuid::new_v4())
    }

    #[test]
    fn test_has_role_membership() {
        let ctx = ctx_with_roles(vec![RoleName::Employer]);
        assert!(ctx.has_role(RoleName::Employer));
        assert!(!ctx.has_role(RoleName::Candidate));
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_primary_role_priority_candidate_first() {
        // A user holding all three roles resolves to candidate
        let ctx = ctx_with_roles(vec![RoleName::Admin, RoleName::Employer, RoleName::Candidate]);
        assert_eq!(ctx.primary_role(), Some(RoleName::Candidate));

        // employer + admin resolves to employer
        let ctx = ctx_with_roles(vec![RoleName::Admin, RoleName::Employer]);
        assert_eq!(ctx.primary_role(), Some(RoleName::Employer));

        // admin alone resolves to admin
        let ctx = ctx_with_roles(vec![RoleName::Admin]);
        assert_eq!(ctx.primary_role(), Some(RoleName::Admin));
    }

    #[test]
    fn test_primary_role_none_without_roles() {
        let ctx = ctx_with_roles(vec![]);
        assert_eq!(ctx.primary_role(), None);
    }

    #[test]
    fn test_is_owner_or_admin_owner_match() {
        let ctx = ctx_with_roles(vec![RoleName::Employer]);
        let owner = ctx.user.id;
        assert!(is_owner_or_admin(&ctx, &[owner]));
        assert!(is_owner_or_admin(&ctx, &[Uuid::new_v4(), owner]));
        assert!(!is_owner_or_admin(&ctx, &[Uuid::new_v4()]));
        assert!(!is_owner_or_admin(&ctx, &[]));
    }

    #[test]
    fn test_is_owner_or_admin_admin_override() {
        let ctx = ctx_with_roles(vec![RoleName::Admin]);
        // Admin passes even when not in the owner set
        assert!(is_owner_or_admin(&ctx, &[Uuid::new_v4()]));
        assert!(is_owner_or_admin(&ctx, &[]));
    }

    #[test]
    fn test_role_names_for_payloads() {
        let ctx = ctx_with_roles(vec![RoleName::Candidate, RoleName::Employer]);
        assert_eq!(ctx.role_names(), vec!["candidate", "employer"]);
    }
}
