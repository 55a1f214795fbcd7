//! Project parameter contracts.
//!
//! Parameters are declared in a project's configuration and can be referenced
//! from queries. The API exposes them either as a name-keyed map or as a
//! paginated list of summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use insight_core::{DomainError, DomainResult, PaginateArgs, PaginatedData, paginate};

/// A parameter value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParameterValue {
    fn values(&self) -> &[String] {
        match self {
            ParameterValue::Single(v) => core::slice::from_ref(v),
            ParameterValue::Multiple(vs) => vs,
        }
    }
}

/// A parameter as declared in project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParameter {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParameterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
}

impl ProjectParameter {
    /// Check a value supplied for this parameter.
    pub fn validate(&self, value: &ParameterValue) -> DomainResult<()> {
        if matches!(value, ParameterValue::Multiple(_)) && self.multiple != Some(true) {
            return Err(DomainError::validation(format!(
                "parameter '{}' does not accept multiple values",
                self.label
            )));
        }

        if let Some(options) = &self.options {
            if let Some(bad) = value.values().iter().find(|v| !options.contains(v)) {
                return Err(DomainError::validation(format!(
                    "'{bad}' is not an allowed value for parameter '{}'",
                    self.label
                )));
            }
        }

        Ok(())
    }
}

/// Parameters keyed by name.
pub type ProjectParametersResults = BTreeMap<String, ProjectParameter>;

/// List entry for a project parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParameterSummary {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParameterValue>,
    pub created_at: DateTime<Utc>,
}

impl ProjectParameterSummary {
    pub fn from_parameter(name: impl Into<String>, parameter: &ProjectParameter, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            label: parameter.label.clone(),
            description: parameter.description.clone(),
            default: parameter.default.clone(),
            created_at,
        }
    }
}

pub type ProjectParametersList = PaginatedData<Vec<ProjectParameterSummary>>;

/// Summaries of all parameters, ordered by name and optionally paginated.
pub fn list_parameters(
    results: &ProjectParametersResults,
    created_at: DateTime<Utc>,
    args: Option<PaginateArgs>,
) -> DomainResult<ProjectParametersList> {
    let summaries = results
        .iter()
        .map(|(name, parameter)| ProjectParameterSummary::from_parameter(name.as_str(), parameter, created_at))
        .collect();

    paginate(summaries, args)
}
