//! Dashboard-level filter rules.

use serde::{Deserialize, Serialize};

use insight_core::{Entity, FilterId};

/// Comparison applied by a filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    IsNull,
    NotNull,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    Include,
    DoesNotInclude,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    InThePast,
    NotInThePast,
    InTheNext,
    InTheCurrent,
    NotInTheCurrent,
    InBetween,
    NotInBetween,
}

impl FilterOperator {
    /// Null checks ignore `values`; every other operator needs at least one.
    pub fn takes_values(self) -> bool {
        !matches!(self, FilterOperator::IsNull | FilterOperator::NotNull)
    }
}

/// The field a dashboard filter applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterTarget {
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

/// A single dashboard filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    pub id: FilterId,
    pub target: FilterTarget,
    pub operator: FilterOperator,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Entity for FilterRule {
    type Id = FilterId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
