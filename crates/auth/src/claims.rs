use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use insight_core::{DashboardId, OrganizationId, ProjectId};

use crate::FilterInteractivityOptions;

/// Embed token claims (transport-agnostic).
///
/// This is the payload of an embed token once it has been decoded and its
/// signature verified by whatever layer issued the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedClaims {
    /// External viewer identifier chosen by the embedding application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    pub organization_id: OrganizationId,

    pub project_id: ProjectId,

    /// The dashboard this token grants access to.
    pub dashboard_id: DashboardId,

    /// Dashboard filter interactivity granted to the viewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<FilterInteractivityOptions>,

    #[serde(rename = "iat")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate embed claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding is
/// outside this crate.
pub fn validate_claims(claims: &EmbedClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
