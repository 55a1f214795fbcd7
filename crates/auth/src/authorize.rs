use thiserror::Error;

use insight_core::RoleId;

use crate::{RoleCatalog, Scope};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("no custom role assigned")]
    NoRoleAssigned,

    #[error("role {0} does not exist")]
    UnknownRole(RoleId),

    #[error("forbidden: missing scope '{0}'")]
    Forbidden(String),
}

/// Check that the custom role in effect grants `required`.
///
/// `role` is usually [`MembershipSet::effective_role`](crate::MembershipSet::effective_role).
///
/// - No IO
/// - No panics
pub fn authorize_scope(catalog: &RoleCatalog, role: Option<RoleId>, required: &Scope) -> Result<(), AuthzError> {
    let Some(role_id) = role else {
        tracing::debug!(scope = %required, "denied: no role assigned");
        return Err(AuthzError::NoRoleAssigned);
    };

    if catalog.get(role_id).is_none() {
        tracing::debug!(%role_id, scope = %required, "denied: unknown role");
        return Err(AuthzError::UnknownRole(role_id));
    }

    if catalog.has_scope(role_id, required) {
        Ok(())
    } else {
        tracing::debug!(%role_id, scope = %required, "denied: scope not granted");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
