//! The viewer behind a request.
//!
//! A viewer is either a signed-in user with a session or an anonymous viewer
//! of an embedded dashboard authenticated by an embed token. Only embedded
//! viewers carry an access policy; session users are governed by roles.

use chrono::{DateTime, Utc};

use insight_core::{DashboardId, OrganizationId, ProjectId, UserId};

use crate::{EmbedClaims, FilteringPolicy, TokenValidationError, validate_claims};

/// A registered user authenticated through a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAccount {
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub email: String,
}

/// What an embedded viewer is allowed to do on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedAccess {
    /// `None` when the token carried no filtering options at all.
    pub filtering: Option<FilteringPolicy>,
}

/// A viewer authenticated by an embed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedAccount {
    pub organization_id: OrganizationId,
    pub project_id: ProjectId,
    pub dashboard_id: DashboardId,
    pub external_id: Option<String>,
    pub access: EmbedAccess,
}

impl EmbeddedAccount {
    /// Build an embedded account from verified token claims.
    pub fn from_claims(claims: EmbedClaims, now: DateTime<Utc>) -> Result<Self, TokenValidationError> {
        validate_claims(&claims, now)?;

        let filtering = claims.filtering.map(FilteringPolicy::from);
        tracing::debug!(
            dashboard_id = %claims.dashboard_id,
            external_id = claims.sub.as_deref().unwrap_or("-"),
            filtering = ?filtering,
            "embedded account resolved"
        );

        Ok(Self {
            organization_id: claims.organization_id,
            project_id: claims.project_id,
            dashboard_id: claims.dashboard_id,
            external_id: claims.sub,
            access: EmbedAccess { filtering },
        })
    }
}

/// The resolved viewer of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Session(SessionAccount),
    Embedded(EmbeddedAccount),
}

impl Account {
    pub fn is_embedded(&self) -> bool {
        matches!(self, Account::Embedded(_))
    }

    pub fn organization_id(&self) -> OrganizationId {
        match self {
            Account::Session(s) => s.organization_id,
            Account::Embedded(e) => e.organization_id,
        }
    }

    pub fn as_embedded(&self) -> Option<&EmbeddedAccount> {
        match self {
            Account::Embedded(e) => Some(e),
            Account::Session(_) => None,
        }
    }
}

impl From<SessionAccount> for Account {
    fn from(value: SessionAccount) -> Self {
        Account::Session(value)
    }
}

impl From<EmbeddedAccount> for Account {
    fn from(value: EmbeddedAccount) -> Self {
        Account::Embedded(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterInteractivity, FilterInteractivityOptions, InteractivityMode};
    use chrono::Duration;

    fn claims(filtering: Option<FilterInteractivityOptions>) -> EmbedClaims {
        let now = Utc::now();
        EmbedClaims {
            sub: Some("viewer-1".to_string()),
            organization_id: OrganizationId::new(),
            project_id: ProjectId::new(),
            dashboard_id: DashboardId::new(),
            filtering,
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn from_claims_normalizes_filtering() {
        let c = claims(Some(FilterInteractivityOptions {
            enabled: Some(FilterInteractivity::Mode(InteractivityMode::All)),
            allowed_filters: None,
        }));
        let org = c.organization_id;

        let account = EmbeddedAccount::from_claims(c, Utc::now()).unwrap();
        assert_eq!(account.organization_id, org);
        assert_eq!(account.external_id.as_deref(), Some("viewer-1"));
        assert_eq!(account.access.filtering, Some(FilteringPolicy::All));
    }

    #[test]
    fn from_claims_keeps_absent_filtering_absent() {
        let account = EmbeddedAccount::from_claims(claims(None), Utc::now()).unwrap();
        assert_eq!(account.access.filtering, None);
    }

    #[test]
    fn from_claims_rejects_expired_tokens() {
        let c = claims(None);
        let later = c.expires_at + Duration::seconds(1);
        assert_eq!(
            EmbeddedAccount::from_claims(c, later),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn account_variant_helpers() {
        let session: Account = SessionAccount {
            organization_id: OrganizationId::new(),
            user_id: UserId::new(),
            email: "alice@example.com".to_string(),
        }
        .into();
        assert!(!session.is_embedded());
        assert!(session.as_embedded().is_none());

        let embedded: Account = EmbeddedAccount::from_claims(claims(None), Utc::now())
            .unwrap()
            .into();
        assert!(embedded.is_embedded());
        assert!(embedded.as_embedded().is_some());
    }
}
