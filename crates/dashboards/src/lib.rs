//! `insight-dashboards` — dashboard filter rules, filter access for
//! embedded viewers, and project parameter contracts.

pub mod access;
pub mod filters;
pub mod parameters;

pub use access::{FilterAccess, apply_filter_access};
pub use filters::{FilterOperator, FilterRule, FilterTarget};
pub use parameters::{
    ParameterValue, ProjectParameter, ProjectParameterSummary, ProjectParametersList,
    ProjectParametersResults, list_parameters,
};
