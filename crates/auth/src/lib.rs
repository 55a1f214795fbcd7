//! `insight-auth` — viewer identity and access policy (no HTTP, no storage).
//!
//! Accounts are resolved upstream (session lookup or a verified embed token);
//! this crate only models them and answers policy questions about them.

pub mod account;
pub mod authorize;
pub mod claims;
pub mod filtering;
pub mod membership;
pub mod roles;
pub mod scope;

pub use account::{Account, EmbedAccess, EmbeddedAccount, SessionAccount};
pub use authorize::{AuthzError, authorize_scope};
pub use claims::{EmbedClaims, TokenValidationError, validate_claims};
pub use filtering::{FilterInteractivity, FilterInteractivityOptions, FilteringPolicy, InteractivityMode};
pub use membership::{MembershipSet, OrganizationMembership, ProjectMembership};
pub use roles::{NewRole, Role, RoleCatalog, RoleError, RoleKind, ScopedRole};
pub use scope::Scope;
