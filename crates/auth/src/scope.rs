use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use insight_core::{DomainError, DomainResult};

/// Permission scope granted through a role, e.g. `"view:Dashboard"`.
///
/// Scopes are `action:subject` pairs kept as opaque strings at this layer; the
/// catalog of valid scopes belongs to whoever defines the roles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(Cow<'static, str>);

impl Scope {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Parse a scope name, requiring a non-empty `action:subject` form.
    pub fn parse(name: impl Into<Cow<'static, str>>) -> DomainResult<Self> {
        let name = name.into();
        match name.split_once(':') {
            Some((action, subject)) if !action.is_empty() && !subject.is_empty() => Ok(Self(name)),
            _ => Err(DomainError::validation(format!(
                "scope '{name}' must have the form action:subject"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
