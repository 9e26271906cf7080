//! Remote service boundary
//!
//! The execution/generation service and the account backend are opaque
//! JSON-over-HTTP endpoints. `RemoteServices` is the only seam the rest of
//! the crate talks to; `HttpServices` is the production implementation.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ActionKind;

pub use http::{HttpServices, ServiceEndpoints};

/// Body for code execution and refactoring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRequest {
    pub language: String,
    pub code: String,
}

/// Body for code generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub problem_description: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputResponse {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeResponse {
    #[serde(default)]
    pub code: Option<String>,
}

/// Usage-count report body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    pub username: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Error payload of a non-success response
///
/// The generation service reports `error`, the account backend `msg`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error.or(self.msg).filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The server answered with a non-success status
    #[error("server rejected request ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, message: Option<String> },

    /// No usable response: unreachable host, dropped connection, malformed body
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// Text shown to the user for a server-reported failure
    ///
    /// Falls back to the status reason phrase when the body carried no detail.
    /// Transport failures have no server text.
    pub fn server_text(&self) -> Option<String> {
        match self {
            ServiceError::Rejected {
                message: Some(message),
                ..
            } => Some(message.clone()),
            ServiceError::Rejected {
                status,
                message: None,
            } => Some(
                reqwest::StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
            ServiceError::Transport(_) => None,
        }
    }
}

/// The remote calls the editor depends on
#[async_trait]
pub trait RemoteServices: Send + Sync {
    /// Run `code` and return its textual output
    async fn execute(&self, request: &SourceRequest) -> Result<OutputResponse, ServiceError>;

    /// Generate code from a free-text description
    async fn generate(&self, request: &GenerateRequest) -> Result<CodeResponse, ServiceError>;

    async fn refactor(&self, request: &SourceRequest) -> Result<CodeResponse, ServiceError>;

    /// Bump the per-user counter for `kind`. The response body is ignored.
    async fn report_usage(&self, kind: ActionKind, report: &UsageReport)
        -> Result<(), ServiceError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ServiceError>;
}
