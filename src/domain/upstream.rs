//! Contract with the upstream account-linking API.
//!
//! The Link Issuer only sees this trait, so tests substitute a mock and the
//! server substitutes [`crate::infrastructure::unipile::DisabledUpstream`]
//! when no credentials are configured.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::hosted_link::{HostedLinkRequest, HostedLinkResult};

/// Diagnostic fields the upstream puts in its error bodies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpstreamErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Failure talking to the upstream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream is not configured")]
    NotConfigured,

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Upstream responded with status {status}")]
    Status {
        status: u16,
        body: Option<UpstreamErrorBody>,
    },

    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// JSON diagnostics echoed to the caller.
    pub fn details(&self) -> Value {
        match self {
            Self::Status { status, body } => {
                let mut details = json!({ "upstream_status": status });
                if let Some(body) = body
                    && let (Value::Object(target), Ok(Value::Object(fields))) =
                        (&mut details, serde_json::to_value(body))
                {
                    target.extend(fields);
                }
                details
            }
            other => json!({ "reason": other.to_string() }),
        }
    }
}

/// One operation the upstream client supports, for the admin CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub name: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Upstream hosted-auth operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostedAuthApi: Send + Sync {
    /// Mints one hosted auth link. Single attempt, no retry.
    async fn create_hosted_link(
        &self,
        request: &HostedLinkRequest,
    ) -> Result<HostedLinkResult, UpstreamError>;

    /// Fixed description of what this client can do.
    fn capabilities(&self) -> Vec<Capability>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_details_include_body_fields() {
        let err = UpstreamError::Status {
            status: 401,
            body: Some(UpstreamErrorBody {
                status: Some(401),
                kind: Some("errors/invalid_credentials".to_string()),
                title: Some("Invalid credentials".to_string()),
                detail: None,
            }),
        };

        let details = err.details();
        assert_eq!(details["upstream_status"], 401);
        assert_eq!(details["type"], "errors/invalid_credentials");
        assert_eq!(details["title"], "Invalid credentials");
        assert!(details.get("detail").is_none());
    }

    #[test]
    fn test_transport_details() {
        let details = UpstreamError::Timeout.details();
        assert_eq!(details["reason"], "Upstream request timed out");
    }
}
