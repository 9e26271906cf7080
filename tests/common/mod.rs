//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use runpad::auth::AuthGate;
use runpad::download::DownloadArtifact;
use runpad::model::{ActionKind, AppModel, Notification, PromptSpec, SessionStore};
use runpad::routes::Route;
use runpad::services::{
    CodeResponse, GenerateRequest, LoginRequest, LoginResponse, OutputResponse, RegisterRequest,
    RemoteServices, ServiceError, SourceRequest, UsageReport,
};
use runpad::storage::{KeyValueStore, MemoryStore, StorageError};
use runpad::{Host, Runtime};

// =============================================================================
// Fake remote services
// =============================================================================

/// A call received by `FakeServices`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Execute(SourceRequest),
    Generate(GenerateRequest),
    Refactor(SourceRequest),
    Usage(ActionKind, UsageReport),
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// Records every call and answers with configurable canned results
pub struct FakeServices {
    calls: Mutex<Vec<Call>>,
    pub execute: Mutex<Result<OutputResponse, ServiceError>>,
    pub generate: Mutex<Result<CodeResponse, ServiceError>>,
    pub refactor: Mutex<Result<CodeResponse, ServiceError>>,
    pub usage: Mutex<Result<(), ServiceError>>,
    pub login: Mutex<Result<LoginResponse, ServiceError>>,
    pub register: Mutex<Result<(), ServiceError>>,
    /// Simulated round-trip time for every call
    pub latency: Mutex<Option<Duration>>,
}

impl Default for FakeServices {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            execute: Mutex::new(Ok(output("ok"))),
            generate: Mutex::new(Ok(code("generated()"))),
            refactor: Mutex::new(Ok(code("refactored()"))),
            usage: Mutex::new(Ok(())),
            login: Mutex::new(Ok(LoginResponse {
                token: "token-123".to_string(),
                username: "alice".to_string(),
            })),
            register: Mutex::new(Ok(())),
            latency: Mutex::new(None),
        }
    }
}

pub fn output(text: &str) -> OutputResponse {
    OutputResponse {
        output: Some(text.to_string()),
    }
}

pub fn code(text: &str) -> CodeResponse {
    CodeResponse {
        code: Some(text.to_string()),
    }
}

pub fn transport_error() -> ServiceError {
    ServiceError::Transport("connection refused".to_string())
}

impl FakeServices {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn execute_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Execute(_)))
    }

    pub fn generate_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Generate(_)))
    }

    pub fn refactor_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Refactor(_)))
    }

    pub fn usage_calls(&self) -> Vec<(ActionKind, UsageReport)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Usage(kind, report) => Some((kind, report)),
                _ => None,
            })
            .collect()
    }

    pub fn set_execute(&self, result: Result<OutputResponse, ServiceError>) {
        *self.execute.lock().unwrap() = result;
    }

    pub fn set_generate(&self, result: Result<CodeResponse, ServiceError>) {
        *self.generate.lock().unwrap() = result;
    }

    pub fn set_refactor(&self, result: Result<CodeResponse, ServiceError>) {
        *self.refactor.lock().unwrap() = result;
    }

    pub fn set_usage(&self, result: Result<(), ServiceError>) {
        *self.usage.lock().unwrap() = result;
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl RemoteServices for FakeServices {
    async fn execute(&self, request: &SourceRequest) -> Result<OutputResponse, ServiceError> {
        self.record(Call::Execute(request.clone())).await;
        self.execute.lock().unwrap().clone()
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<CodeResponse, ServiceError> {
        self.record(Call::Generate(request.clone())).await;
        self.generate.lock().unwrap().clone()
    }

    async fn refactor(&self, request: &SourceRequest) -> Result<CodeResponse, ServiceError> {
        self.record(Call::Refactor(request.clone())).await;
        self.refactor.lock().unwrap().clone()
    }

    async fn report_usage(
        &self,
        kind: ActionKind,
        report: &UsageReport,
    ) -> Result<(), ServiceError> {
        self.record(Call::Usage(kind, report.clone())).await;
        self.usage.lock().unwrap().clone()
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError> {
        self.record(Call::Login(request.clone())).await;
        self.login.lock().unwrap().clone()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ServiceError> {
        self.record(Call::Register(request.clone())).await;
        self.register.lock().unwrap().clone()
    }
}

// =============================================================================
// Recording host
// =============================================================================

/// A platform effect observed by `RecordingHost`
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Clipboard(String),
    Prompt(PromptSpec),
    Navigate(Route),
    ScrollToOutput,
    Download(DownloadArtifact),
    Notify(Notification),
}

#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    /// Answer given to the next prompt; `None` cancels
    pub prompt_answer: Mutex<Option<String>>,
    /// Answers handed out in order, each after its delay. Takes precedence
    /// over `prompt_answer` while non-empty.
    pub prompt_script: Mutex<VecDeque<(Duration, Option<String>)>>,
    pub clipboard_fails: AtomicBool,
    /// How long each clipboard write takes
    pub clipboard_latency: Mutex<Option<Duration>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn answer_prompts_with(&self, answer: Option<&str>) {
        *self.prompt_answer.lock().unwrap() = answer.map(str::to_string);
    }

    /// Queue an answer for the next unanswered prompt, given after `delay`
    pub fn script_prompt(&self, delay: Duration, answer: Option<&str>) {
        self.prompt_script
            .lock()
            .unwrap()
            .push_back((delay, answer.map(str::to_string)));
    }

    pub fn set_clipboard_latency(&self, latency: Duration) {
        *self.clipboard_latency.lock().unwrap() = Some(latency);
    }

    pub fn clipboard_writes(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HostEvent::Clipboard(_)))
            .count()
    }

    pub fn fail_clipboard(&self) {
        self.clipboard_fails.store(true, Ordering::SeqCst);
    }

    pub fn navigations(&self) -> Vec<Route> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Navigate(route) => Some(route),
                _ => None,
            })
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn scrolls(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HostEvent::ScrollToOutput))
            .count()
    }

    fn push(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn write_clipboard(&self, text: &str) -> Result<(), String> {
        self.push(HostEvent::Clipboard(text.to_string()));
        let latency = *self.clipboard_latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.clipboard_fails.load(Ordering::SeqCst) {
            Err("clipboard unavailable".to_string())
        } else {
            Ok(())
        }
    }

    async fn prompt(&self, spec: PromptSpec) -> Option<String> {
        self.push(HostEvent::Prompt(spec));
        let scripted = self.prompt_script.lock().unwrap().pop_front();
        match scripted {
            Some((delay, answer)) => {
                tokio::time::sleep(delay).await;
                answer
            }
            None => self.prompt_answer.lock().unwrap().clone(),
        }
    }

    fn navigate(&self, route: &Route) {
        self.push(HostEvent::Navigate(route.clone()));
    }

    fn scroll_to_output(&self) {
        self.push(HostEvent::ScrollToOutput);
    }

    fn save_download(&self, artifact: &DownloadArtifact) -> Result<(), String> {
        self.push(HostEvent::Download(artifact.clone()));
        Ok(())
    }

    fn notify(&self, notification: &Notification) {
        self.push(HostEvent::Notify(notification.clone()));
    }
}

// =============================================================================
// Storage
// =============================================================================

/// A storage medium that is never available
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Model for `language` with `code` already in the buffer
pub fn test_model(language: &str, code: &str) -> AppModel {
    let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
    sessions.save(language, code, "");
    AppModel::new(sessions, language, 1280)
}

/// A runtime wired to fakes, plus handles to inspect them
pub struct Harness {
    pub runtime: Runtime,
    pub services: Arc<FakeServices>,
    pub host: Arc<RecordingHost>,
    pub session_store: Arc<MemoryStore>,
    pub auth_store: Arc<MemoryStore>,
}

impl Harness {
    pub fn new(language: &str, code: &str) -> Self {
        let session_store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(session_store.clone());
        sessions.save(language, code, "");
        let model = AppModel::new(sessions, language, 1280);

        let services = FakeServices::new();
        let host = RecordingHost::new();
        let auth_store = Arc::new(MemoryStore::new());
        let runtime = Runtime::new(
            model,
            services.clone(),
            host.clone(),
            AuthGate::new(auth_store.clone()),
        );

        Self {
            runtime,
            services,
            host,
            session_store,
            auth_store,
        }
    }

    /// Same as `new`, with alice already signed in
    pub fn signed_in(language: &str, code: &str) -> Self {
        let harness = Self::new(language, code);
        harness
            .runtime
            .auth()
            .sign_in("token-123", "alice")
            .expect("memory store accepts writes");
        harness
    }

    pub fn code(&self) -> &str {
        &self.runtime.model().session.code
    }

    pub fn output(&self) -> &str {
        &self.runtime.model().session.output
    }
}
