//! Dashboard filter interactivity policy for embedded viewers.
//!
//! The wire format is loose: `enabled` may be a boolean, `"all"` or `"some"`,
//! and `allowedFilters` is only meaningful for some of those. Everything is
//! normalized into [`FilteringPolicy`] on the way in, so callers never have
//! to interpret the raw shape.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use insight_core::FilterId;

/// Named interactivity modes accepted in `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractivityMode {
    All,
    Some,
}

/// Raw `enabled` value as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterInteractivity {
    Flag(bool),
    Mode(InteractivityMode),
    /// Anything else. Treated as disabled.
    Unrecognized(serde_json::Value),
}

/// Raw filter interactivity options carried in embed tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterInteractivityOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<FilterInteractivity>,

    #[serde(
        default,
        deserialize_with = "lenient_filter_ids",
        skip_serializing_if = "Option::is_none"
    )]
    pub allowed_filters: Option<Vec<FilterId>>,
}

/// A malformed `allowedFilters` decodes as absent rather than failing the
/// whole token.
fn lenient_filter_ids<'de, D>(deserializer: D) -> Result<Option<Vec<FilterId>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value::<Vec<FilterId>>(v).ok()))
}

/// Normalized filtering policy.
///
/// Only `Subset` carries an allow-list, so an allow-list can never be
/// consulted while the policy is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteringPolicy {
    /// No dashboard filters may be applied.
    Disabled,
    /// Every dashboard filter may be applied.
    All,
    /// Only the listed filters may be applied.
    Subset(BTreeSet<FilterId>),
}

impl FilteringPolicy {
    pub fn subset<I, F>(ids: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FilterId>,
    {
        Self::Subset(ids.into_iter().map(Into::into).collect())
    }

    /// Whether the filter with `id` may be applied under this policy.
    pub fn permits(&self, id: &FilterId) -> bool {
        match self {
            FilteringPolicy::Disabled => false,
            FilteringPolicy::All => true,
            FilteringPolicy::Subset(allowed) => allowed.contains(id),
        }
    }

    /// True unless the policy is `Disabled`.
    ///
    /// An empty `Subset` is enabled but permits nothing.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, FilteringPolicy::Disabled)
    }
}

impl From<FilterInteractivityOptions> for FilteringPolicy {
    fn from(options: FilterInteractivityOptions) -> Self {
        match options.enabled {
            Some(FilterInteractivity::Mode(InteractivityMode::All)) => FilteringPolicy::All,
            Some(FilterInteractivity::Flag(true))
            | Some(FilterInteractivity::Mode(InteractivityMode::Some)) => FilteringPolicy::Subset(
                options.allowed_filters.unwrap_or_default().into_iter().collect(),
            ),
            // `false`, missing and unrecognized values all deny; allowedFilters stays inert.
            Some(FilterInteractivity::Flag(false))
            | Some(FilterInteractivity::Unrecognized(_))
            | None => FilteringPolicy::Disabled,
        }
    }
}
