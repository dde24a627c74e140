//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Status of each integration the service depends on.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub upstream: CheckStatus,
    pub linkedin_oauth: CheckStatus,
    pub proxy: CheckStatus,
}

/// Individual component health status.
///
/// `status` is `ok` or `disabled`; a disabled integration does not make the
/// service unhealthy.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn disabled(message: impl Into<String>) -> Self {
        Self {
            status: "disabled".to_string(),
            message: Some(message.into()),
        }
    }
}
