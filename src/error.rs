//! HTTP boundary error type.
//!
//! Every failure reaching a route handler is converted into [`AppError`],
//! which renders as `{"error": <message>, "details": <json>}` with a
//! non-2xx status. `details` is omitted when there is nothing to add.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::IssueError;
use crate::domain::upstream::UpstreamError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

#[derive(Debug)]
pub enum AppError {
    NotConfigured {
        message: String,
        details: Value,
    },
    Validation {
        message: String,
        details: Value,
    },
    NotFound {
        message: String,
        details: Value,
    },
    UpstreamCallFailed {
        message: String,
        details: Value,
    },
    UpstreamMalformedResponse {
        message: String,
        details: Value,
    },
    ProxyForwardingFailed {
        status: StatusCode,
        message: String,
        details: Value,
    },
    Internal {
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn not_configured(message: impl Into<String>, details: Value) -> Self {
        Self::NotConfigured {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn upstream_failed(message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamCallFailed {
            message: message.into(),
            details,
        }
    }
    pub fn upstream_malformed(message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamMalformedResponse {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Forwarding failure: 504 on timeout, 502 otherwise. Never a 2xx.
    pub fn proxy_failed(err: &UpstreamError) -> Self {
        let status = match err {
            UpstreamError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            UpstreamError::Status { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            _ => StatusCode::BAD_GATEWAY,
        };

        Self::ProxyForwardingFailed {
            status,
            message: "Upstream request failed".to_string(),
            details: err.details(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamCallFailed { .. }
            | Self::UpstreamMalformedResponse { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProxyForwardingFailed { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotConfigured { message, .. }
            | Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::UpstreamCallFailed { message, .. }
            | Self::UpstreamMalformedResponse { message, .. }
            | Self::ProxyForwardingFailed { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        match &err {
            IssueError::NotConfigured => AppError::not_configured(err.to_string(), Value::Null),
            IssueError::ProviderNotEnabled(provider) => AppError::not_found(
                err.to_string(),
                json!({ "provider": provider.as_str() }),
            ),
            IssueError::UpstreamMalformedResponse => AppError::upstream_malformed(
                err.to_string(),
                json!({ "reason": "Upstream response did not contain a url" }),
            ),
            IssueError::UpstreamCallFailed(source) => {
                AppError::upstream_failed("Internal error", source.details())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, details) = match self {
            Self::NotConfigured { message, details }
            | Self::Validation { message, details }
            | Self::NotFound { message, details }
            | Self::UpstreamCallFailed { message, details }
            | Self::UpstreamMalformedResponse { message, details }
            | Self::ProxyForwardingFailed {
                message, details, ..
            }
            | Self::Internal { message, details } => (message, details),
        };

        let body = ErrorBody {
            error: message,
            details,
        };

        (status, Json(body)).into_response()
    }
}
