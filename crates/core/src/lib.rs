//! `insight-core` — shared domain primitives.
//!
//! Identifiers, the domain error model, entity identity and the pagination
//! envelope used by list endpoints. No infrastructure concerns live here.

pub mod entity;
pub mod error;
pub mod id;
pub mod pagination;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DashboardId, FilterId, OrganizationId, ProjectId, RoleId, UserId};
pub use pagination::{PaginateArgs, PaginatedData, Pagination, paginate};
