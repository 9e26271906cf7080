//! reqwest-backed `RemoteServices`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    CodeResponse, ErrorBody, GenerateRequest, LoginRequest, LoginResponse, OutputResponse,
    RegisterRequest, RemoteServices, ServiceError, SourceRequest, UsageReport,
};
use crate::model::ActionKind;

const EXECUTE_PATH: &str = "/get-output";
const GENERATE_PATH: &str = "/generate_code";
const REFACTOR_PATH: &str = "/refactor_code";
const LOGIN_PATH: &str = "/api/login";
const REGISTER_PATH: &str = "/api/register";

fn usage_path(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Run => "/api/runCode/count",
        ActionKind::Generate => "/api/generateCode/count",
        ActionKind::Refactor => "/api/refactorCode/count",
    }
}

/// Base URLs of the two remote services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    /// Execution and generation service
    pub genai_url: String,
    /// Account and usage-count backend
    pub backend_url: String,
}

impl ServiceEndpoints {
    pub fn new(genai_url: impl Into<String>, backend_url: impl Into<String>) -> Self {
        Self {
            genai_url: genai_url.into(),
            backend_url: backend_url.into(),
        }
    }

    fn genai(&self, path: &str) -> String {
        format!("{}{}", self.genai_url.trim_end_matches('/'), path)
    }

    fn backend(&self, path: &str) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), path)
    }
}

pub struct HttpServices {
    client: Client,
    endpoints: ServiceEndpoints,
}

impl HttpServices {
    /// Build a client. `timeout` of `None` leaves requests unbounded.
    pub fn new(endpoints: ServiceEndpoints, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        tracing::debug!(
            "HTTP services: genai={} backend={} timeout={:?}",
            endpoints.genai_url,
            endpoints.backend_url,
            timeout
        );
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    /// POST `body` as JSON and return the raw response, mapping non-2xx
    /// statuses to `ServiceError::Rejected`
    async fn send<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, ServiceError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("POST {} -> {}", url, status);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message);
        tracing::warn!("POST {} rejected: {} {:?}", url, status, message);
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(url, body).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| ServiceError::Transport(format!("malformed response from {}: {}", url, e)))
    }
}

#[async_trait]
impl RemoteServices for HttpServices {
    async fn execute(&self, request: &SourceRequest) -> Result<OutputResponse, ServiceError> {
        self.post_json(&self.endpoints.genai(EXECUTE_PATH), request)
            .await
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<CodeResponse, ServiceError> {
        self.post_json(&self.endpoints.genai(GENERATE_PATH), request)
            .await
    }

    async fn refactor(&self, request: &SourceRequest) -> Result<CodeResponse, ServiceError> {
        self.post_json(&self.endpoints.genai(REFACTOR_PATH), request)
            .await
    }

    async fn report_usage(
        &self,
        kind: ActionKind,
        report: &UsageReport,
    ) -> Result<(), ServiceError> {
        self.send(&self.endpoints.backend(usage_path(kind)), report)
            .await
            .map(|_| ())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        self.post_json(&self.endpoints.backend(LOGIN_PATH), request)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ServiceError> {
        self.send(&self.endpoints.backend(REGISTER_PATH), request)
            .await
            .map(|_| ())
    }
}
