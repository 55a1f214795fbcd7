//! Which dashboard filters a viewer may apply.
//!
//! Session viewers (and requests with no viewer at all, e.g. internal jobs)
//! are unrestricted. Embedded viewers only get the filters their token's
//! filtering policy allows, and a token without a policy gets none.

use std::collections::BTreeSet;

use insight_auth::{Account, FilteringPolicy};
use insight_core::{Entity, FilterId};

/// Resolved filter access for one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAccess {
    /// Every filter is kept.
    Unrestricted,
    /// No filter is kept.
    Denied,
    /// Only filters with these ids are kept.
    Allowed(BTreeSet<FilterId>),
}

impl FilterAccess {
    pub fn for_account(account: Option<&Account>) -> Self {
        let Some(Account::Embedded(embedded)) = account else {
            return FilterAccess::Unrestricted;
        };

        match &embedded.access.filtering {
            None | Some(FilteringPolicy::Disabled) => FilterAccess::Denied,
            Some(FilteringPolicy::All) => FilterAccess::Unrestricted,
            Some(FilteringPolicy::Subset(allowed)) if allowed.is_empty() => FilterAccess::Denied,
            Some(FilteringPolicy::Subset(allowed)) => FilterAccess::Allowed(allowed.clone()),
        }
    }

    pub fn permits(&self, id: &FilterId) -> bool {
        match self {
            FilterAccess::Unrestricted => true,
            FilterAccess::Denied => false,
            FilterAccess::Allowed(allowed) => allowed.contains(id),
        }
    }

    /// Keep the permitted rules, in their original order.
    pub fn apply<R>(&self, rules: &[R]) -> Vec<R>
    where
        R: Entity<Id = FilterId> + Clone,
    {
        match self {
            FilterAccess::Unrestricted => rules.to_vec(),
            FilterAccess::Denied => Vec::new(),
            FilterAccess::Allowed(_) => rules.iter().filter(|r| self.permits(r.id())).cloned().collect(),
        }
    }
}

/// Filter `rules` down to those the viewer may apply.
///
/// Never fails: anything short of an explicit grant denies.
pub fn apply_filter_access<R>(account: Option<&Account>, rules: &[R]) -> Vec<R>
where
    R: Entity<Id = FilterId> + Clone,
{
    let access = FilterAccess::for_account(account);
    let kept = access.apply(rules);

    if account.is_some_and(Account::is_embedded) {
        tracing::debug!(
            total = rules.len(),
            kept = kept.len(),
            dropped = rules.len() - kept.len(),
            "embedded viewer filter access applied"
        );
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use insight_auth::{EmbedAccess, EmbeddedAccount, SessionAccount};
    use insight_core::{DashboardId, OrganizationId, ProjectId, UserId};

    #[derive(Debug, Clone, PartialEq)]
    struct Rule {
        id: FilterId,
        label: &'static str,
    }

    impl Entity for Rule {
        type Id = FilterId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule { id: "filter-1".into(), label: "Filter 1" },
            Rule { id: "filter-2".into(), label: "Filter 2" },
            Rule { id: "filter-3".into(), label: "Filter 3" },
        ]
    }

    fn embedded(filtering: Option<FilteringPolicy>) -> Account {
        Account::Embedded(EmbeddedAccount {
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            dashboard_id: DashboardId::new(),
            external_id: None,
            access: EmbedAccess { filtering },
        })
    }

    fn session() -> Account {
        Account::Session(SessionAccount {
            organization_id: OrganizationId::new(),
            user_id: UserId::new(),
            email: "test@example.com".to_string(),
        })
    }

    #[test]
    fn session_and_absent_viewers_keep_everything() {
        assert_eq!(apply_filter_access(Some(&session()), &rules()), rules());
        assert_eq!(apply_filter_access(None, &rules()), rules());
    }

    #[test]
    fn embedded_subset_keeps_allowed_in_order() {
        let account = embedded(Some(FilteringPolicy::subset(["filter-2", "filter-1"])));
        let result = apply_filter_access(Some(&account), &rules());

        assert_eq!(result.len(), 2);
        assert_eq!(result, vec![rules()[0].clone(), rules()[1].clone()]);
        assert_eq!(result[0].label, "Filter 1");
    }

    #[test]
    fn embedded_all_keeps_everything() {
        let account = embedded(Some(FilteringPolicy::All));
        assert_eq!(apply_filter_access(Some(&account), &rules()), rules());
    }

    #[test]
    fn embedded_without_policy_is_denied() {
        let account = embedded(None);
        assert!(apply_filter_access(Some(&account), &rules()).is_empty());
        assert_eq!(FilterAccess::for_account(Some(&account)), FilterAccess::Denied);
    }

    #[test]
    fn embedded_disabled_or_empty_subset_is_denied() {
        for policy in [FilteringPolicy::Disabled, FilteringPolicy::Subset(BTreeSet::new())] {
            let account = embedded(Some(policy));
            assert!(apply_filter_access(Some(&account), &rules()).is_empty());
        }
    }

    #[test]
    fn unknown_allowed_ids_match_nothing() {
        let account = embedded(Some(FilteringPolicy::subset(["filter-9"])));
        assert!(apply_filter_access(Some(&account), &rules()).is_empty());
    }

    #[test]
    fn from_claims_round_trip_into_access() {
        use insight_auth::{EmbedClaims, FilterInteractivity, FilterInteractivityOptions};

        let now = Utc::now();
        let claims = EmbedClaims {
            sub: None,
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            dashboard_id: DashboardId::new(),
            filtering: Some(FilterInteractivityOptions {
                enabled: Some(FilterInteractivity::Flag(true)),
                allowed_filters: Some(vec!["filter-3".into()]),
            }),
            issued_at: now - chrono::Duration::minutes(1),
            expires_at: now + chrono::Duration::minutes(5),
        };
        let account: Account = EmbeddedAccount::from_claims(claims, now).unwrap().into();

        let result = apply_filter_access(Some(&account), &rules());
        assert_eq!(result, vec![rules()[2].clone()]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
            prop::collection::vec("filter-[0-9]", 0..12).prop_map(|ids| {
                ids.into_iter()
                    .map(|id| Rule { id: FilterId::new(id), label: "rule" })
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: output is always the input order-preserving subsequence
            /// of rules whose id is allowed.
            #[test]
            fn subset_is_order_preserving_selection(
                rules in arb_rules(),
                allowed in prop::collection::btree_set("filter-[0-9]", 0..6)
            ) {
                let account = embedded(Some(FilteringPolicy::subset(allowed.clone())));
                let result = apply_filter_access(Some(&account), &rules);

                let expected: Vec<Rule> = rules
                    .iter()
                    .filter(|r| allowed.contains(r.id.as_str()))
                    .cloned()
                    .collect();
                prop_assert_eq!(result, expected);
            }

            /// Property: non-embedded viewers and `All` policies are the identity.
            #[test]
            fn unrestricted_viewers_get_input_back(rules in arb_rules()) {
                prop_assert_eq!(apply_filter_access(None, &rules), rules.clone());
                prop_assert_eq!(apply_filter_access(Some(&session()), &rules), rules.clone());
                let all = embedded(Some(FilteringPolicy::All));
                prop_assert_eq!(apply_filter_access(Some(&all), &rules), rules);
            }

            /// Property: disabled or missing policies always yield nothing.
            #[test]
            fn denied_viewers_get_nothing(rules in arb_rules()) {
                prop_assert!(apply_filter_access(Some(&embedded(None)), &rules).is_empty());
                let disabled = embedded(Some(FilteringPolicy::Disabled));
                prop_assert!(apply_filter_access(Some(&disabled), &rules).is_empty());
            }
        }
    }
}
