//! Custom roles and the scopes granted to them.
//!
//! # Invariants
//! - A user-defined role belongs to exactly one organization; a system role to none.
//! - Role names are unique per owner (organization, or the system namespace).
//! - A scope is granted to a role at most once.
//! - A role referenced by any membership cannot be deleted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use insight_core::{Entity, OrganizationId, RoleId, UserId};

use crate::{MembershipSet, Scope};

/// Who owns a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoleKind {
    /// Defined by an organization admin.
    User { organization_id: OrganizationId },
    /// Shipped with the product.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_id: RoleId,
    pub name: String,
    pub description: Option<String>,
    pub kind: RoleKind,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn organization_id(&self) -> Option<OrganizationId> {
        match self.kind {
            RoleKind::User { organization_id } => Some(organization_id),
            RoleKind::System => None,
        }
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.role_id
    }
}

/// Input for [`RoleCatalog::create_role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRole {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: RoleKind,
    #[serde(default)]
    pub created_by: Option<UserId>,
}

/// A scope granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedRole {
    pub role_id: RoleId,
    pub scope: Scope,
    pub granted_at: DateTime<Utc>,
    pub granted_by: Option<UserId>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleError {
    #[error("role name must not be empty")]
    EmptyName,

    #[error("a role named '{0}' already exists")]
    DuplicateName(String),

    #[error("role {0} not found")]
    RoleNotFound(RoleId),

    #[error("scope '{scope}' already granted to role {role_id}")]
    ScopeAlreadyGranted { role_id: RoleId, scope: Scope },

    #[error("scope '{scope}' is not granted to role {role_id}")]
    ScopeNotGranted { role_id: RoleId, scope: Scope },

    #[error("role {0} is assigned to members and cannot be deleted")]
    RoleInUse(RoleId),
}

/// In-memory registry of roles and their scope grants.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: BTreeMap<RoleId, Role>,
    grants: BTreeMap<(RoleId, Scope), ScopedRole>,
}

impl RoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.get(&role_id)
    }

    pub fn create_role(&mut self, new: NewRole, now: DateTime<Utc>) -> Result<&Role, RoleError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(RoleError::EmptyName);
        }

        let owner = owner_of(&new.kind);
        if self
            .roles
            .values()
            .any(|r| owner_of(&r.kind) == owner && r.name == name)
        {
            return Err(RoleError::DuplicateName(name.to_string()));
        }

        let role = Role {
            role_id: RoleId::new(),
            name: name.to_string(),
            description: new.description,
            kind: new.kind,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        };
        let role_id = role.role_id;
        tracing::info!(%role_id, name = %role.name, "role created");

        Ok(self.roles.entry(role_id).or_insert(role))
    }

    pub fn grant_scope(
        &mut self,
        role_id: RoleId,
        scope: Scope,
        granted_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<&ScopedRole, RoleError> {
        if !self.roles.contains_key(&role_id) {
            return Err(RoleError::RoleNotFound(role_id));
        }

        let key = (role_id, scope.clone());
        if self.grants.contains_key(&key) {
            return Err(RoleError::ScopeAlreadyGranted { role_id, scope });
        }

        tracing::info!(%role_id, %scope, "scope granted");
        Ok(self.grants.entry(key).or_insert(ScopedRole {
            role_id,
            scope,
            granted_at: now,
            granted_by,
        }))
    }

    pub fn revoke_scope(&mut self, role_id: RoleId, scope: &Scope) -> Result<ScopedRole, RoleError> {
        self.grants
            .remove(&(role_id, scope.clone()))
            .ok_or_else(|| RoleError::ScopeNotGranted {
                role_id,
                scope: scope.clone(),
            })
    }

    /// Scopes granted to a role, ordered by name.
    pub fn scopes_for(&self, role_id: RoleId) -> Vec<&Scope> {
        self.grants
            .range((role_id, Scope::from_static(""))..)
            .take_while(|((id, _), _)| *id == role_id)
            .map(|((_, scope), _)| scope)
            .collect()
    }

    pub fn has_scope(&self, role_id: RoleId, scope: &Scope) -> bool {
        self.grants.contains_key(&(role_id, scope.clone()))
    }

    /// Delete a role and its scope grants.
    ///
    /// Refused while any membership still references the role.
    pub fn delete_role(&mut self, role_id: RoleId, memberships: &MembershipSet) -> Result<Role, RoleError> {
        if !self.roles.contains_key(&role_id) {
            return Err(RoleError::RoleNotFound(role_id));
        }
        if memberships.references_role(role_id) {
            return Err(RoleError::RoleInUse(role_id));
        }

        self.grants.retain(|(id, _), _| *id != role_id);
        tracing::info!(%role_id, "role deleted");
        self.roles
            .remove(&role_id)
            .ok_or(RoleError::RoleNotFound(role_id))
    }

    /// Roles owned by an organization, ordered by name.
    pub fn roles_for_organization(&self, organization_id: OrganizationId) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self
            .roles
            .values()
            .filter(|r| r.organization_id() == Some(organization_id))
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }
}

fn owner_of(kind: &RoleKind) -> Option<OrganizationId> {
    match kind {
        RoleKind::User { organization_id } => Some(*organization_id),
        RoleKind::System => None,
    }
}
