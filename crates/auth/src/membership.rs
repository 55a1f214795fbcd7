//! Organization and project memberships.
//!
//! A membership may reference a custom role via `role_id`. The legacy
//! `role` column is still carried for members without a custom role.

use serde::{Deserialize, Serialize};

use insight_core::{OrganizationId, ProjectId, RoleId, UserId};

/// Legacy role name given to memberships created without one.
pub const DEFAULT_MEMBER_ROLE: &str = "member";

fn default_member_role() -> Option<String> {
    Some(DEFAULT_MEMBER_ROLE.to_string())
}

/// A user's membership in an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMembership {
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    #[serde(default = "default_member_role")]
    pub role: Option<String>,
    #[serde(default)]
    pub role_id: Option<RoleId>,
}

/// A user's membership in a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMembership {
    pub project_id: ProjectId,
    pub user_id: UserId,
    #[serde(default = "default_member_role")]
    pub role: Option<String>,
    #[serde(default)]
    pub role_id: Option<RoleId>,
}

/// All memberships known to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSet {
    pub organization: Vec<OrganizationMembership>,
    pub project: Vec<ProjectMembership>,
}

impl MembershipSet {
    /// Whether any membership is assigned the given custom role.
    pub fn references_role(&self, role_id: RoleId) -> bool {
        self.organization.iter().any(|m| m.role_id == Some(role_id))
            || self.project.iter().any(|m| m.role_id == Some(role_id))
    }

    /// Custom role in effect for a user.
    ///
    /// A project-level role wins over the organization-level one.
    pub fn effective_role(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
        project_id: Option<ProjectId>,
    ) -> Option<RoleId> {
        let project_role = project_id.and_then(|project_id| {
            self.project
                .iter()
                .find(|m| m.user_id == user_id && m.project_id == project_id)
                .and_then(|m| m.role_id)
        });

        project_role.or_else(|| {
            self.organization
                .iter()
                .find(|m| m.user_id == user_id && m.organization_id == organization_id)
                .and_then(|m| m.role_id)
        })
    }
}
