//! Async runtime driving the update loop
//!
//! The runtime owns the model. Every side effect an update asks for runs on
//! a tokio task and reports back with a message on the runtime's channel;
//! messages are applied one at a time, so the model only changes between
//! awaited effects.

pub mod host;

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tokio::task::AbortHandle;
use tracing::Instrument;

use crate::auth::{AuthContext, AuthError, AuthGate};
use crate::commands::Cmd;
use crate::messages::{ActionMsg, ClipboardMsg, EditorMsg, Msg, UiMsg};
use crate::model::{AppModel, Notification};
use crate::routes::{resolve_page, Guarded, Route};
use crate::services::RemoteServices;
use crate::update::update;

pub use host::Host;

/// Number of spawned effects still running, with a wakeup when it drops to zero
#[derive(Default)]
struct EffectTracker {
    count: AtomicUsize,
    idle: Notify,
}

/// Counts a spawned effect until it has reported back (or was aborted)
struct InFlight(Arc<EffectTracker>);

impl InFlight {
    fn enter(tracker: &Arc<EffectTracker>) -> Self {
        tracker.count.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(tracker))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

pub struct Runtime {
    model: AppModel,
    services: Arc<dyn RemoteServices>,
    host: Arc<dyn Host>,
    auth: AuthGate,
    route: Route,
    /// Page shown before `route`, if any
    previous_route: Option<Route>,
    msg_tx: UnboundedSender<Msg>,
    msg_rx: UnboundedReceiver<Msg>,
    /// The one pending clipboard reset timer
    clipboard_reset: Option<AbortHandle>,
    effects: Arc<EffectTracker>,
}

impl Runtime {
    pub fn new(
        model: AppModel,
        services: Arc<dyn RemoteServices>,
        host: Arc<dyn Host>,
        auth: AuthGate,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let route = Route::Editor(model.language().to_string());
        Self {
            model,
            services,
            host,
            auth,
            route,
            previous_route: None,
            msg_tx,
            msg_rx,
            clipboard_reset: None,
            effects: Arc::new(EffectTracker::default()),
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    /// Page currently shown
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Number of spawned effects that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.effects.count.load(Ordering::SeqCst)
    }

    // =========================================================================
    // User intents
    // =========================================================================

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.dispatch(EditorMsg::SetCode(code.into()).into());
    }

    pub fn clear(&mut self) {
        self.dispatch(EditorMsg::Clear.into());
    }

    pub fn open_language(&mut self, language: &str) {
        self.dispatch(EditorMsg::OpenLanguage(language.to_string()).into());
        self.route = Route::Editor(self.model.language().to_string());
    }

    pub fn run(&mut self) {
        let auth = self.auth.snapshot();
        self.dispatch(ActionMsg::Run(auth).into());
    }

    pub fn generate(&mut self) {
        let auth = self.auth.snapshot();
        self.dispatch(ActionMsg::Generate(auth).into());
    }

    pub fn refactor(&mut self) {
        let auth = self.auth.snapshot();
        self.dispatch(ActionMsg::Refactor(auth).into());
    }

    pub fn copy(&mut self) {
        self.dispatch(ClipboardMsg::Copy.into());
    }

    pub fn download(&mut self) {
        self.dispatch(UiMsg::Download.into());
    }

    pub fn resize(&mut self, width: u32) {
        self.dispatch(UiMsg::Resize(width).into());
    }

    pub fn dismiss_notification(&mut self) {
        self.dispatch(UiMsg::DismissNotification.into());
    }

    /// Navigate to `path`, applying route guards against the current identity
    ///
    /// Returns the page that ends up displayed.
    pub fn navigate(&mut self, path: &str) -> Route {
        let auth = self.auth.snapshot();
        let target = match resolve_page(path, &auth) {
            Guarded::Render(route) => route,
            Guarded::Redirect(route) => {
                tracing::debug!("Navigation to {} redirected to {}", path, route.path());
                route
            }
        };
        self.show(target);
        self.route.clone()
    }

    fn show(&mut self, route: Route) {
        if let Route::Editor(ref language) = route {
            self.dispatch(EditorMsg::OpenLanguage(language.clone()).into());
        }
        self.host.navigate(&route);
        self.previous_route = Some(std::mem::replace(&mut self.route, route));
    }

    fn notify(&mut self, notification: Notification) {
        self.dispatch(UiMsg::Notify(notification).into());
    }

    /// Sign in, then go back to the page shown before the current one
    /// (home when there is none, or when that page is now off limits)
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthContext, AuthError> {
        let ctx = self.auth.login(self.services.as_ref(), email, password).await?;
        let target = match self.previous_route.clone() {
            Some(previous) => match resolve_page(&previous.path(), &ctx) {
                Guarded::Render(route) => route,
                Guarded::Redirect(_) => Route::Home,
            },
            None => Route::Home,
        };
        tracing::debug!("Signed in; returning to {}", target.path());
        self.show(target);
        Ok(ctx)
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.auth
            .register(self.services.as_ref(), username, email, password)
            .await?;
        self.show(Route::Login);
        self.notify(Notification::info(
            "Registered",
            format!("Account {} created. Please log in.", username),
        ));
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.auth.sign_out()?;
        self.show(Route::Home);
        self.notify(Notification::info("Signed out", "You have been signed out."));
        Ok(())
    }

    // =========================================================================
    // Message loop
    // =========================================================================

    /// Apply one message and execute the command it produces
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Wait for the next message from a spawned effect
    pub async fn recv(&mut self) -> Option<Msg> {
        self.msg_rx.recv().await
    }

    /// Apply every message already queued. Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Run until every spawned effect (timers included) has reported back
    /// and its message has been applied
    pub async fn settle(&mut self) {
        loop {
            self.process_pending();

            let effects = Arc::clone(&self.effects);
            let idle = effects.idle.notified();
            if self.in_flight() == 0 {
                if self.process_pending() == 0 {
                    break;
                }
                continue;
            }

            let next = tokio::select! {
                msg = self.msg_rx.recv() => msg,
                _ = idle => None,
            };
            if let Some(msg) = next {
                self.dispatch(msg);
            }
        }
    }

    /// Spawn `effect` inside the caller's span, counted until it finishes
    fn spawn_tracked<F>(&self, effect: F) -> AbortHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = InFlight::enter(&self.effects);
        tokio::spawn(
            async move {
                let _guard = guard;
                effect.await;
            }
            .in_current_span(),
        )
        .abort_handle()
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            // =================================================================
            // Remote calls
            // =================================================================
            Cmd::ExecuteCode { ticket, request } => {
                let services = Arc::clone(&self.services);
                let tx = self.msg_tx.clone();
                self.spawn_tracked(async move {
                    let result = services.execute(&request).await;
                    let _ = tx.send(ActionMsg::RunCompleted { ticket, result }.into());
                });
            }
            Cmd::GenerateCode { ticket, request } => {
                let services = Arc::clone(&self.services);
                let tx = self.msg_tx.clone();
                self.spawn_tracked(async move {
                    let result = services.generate(&request).await;
                    let _ = tx.send(ActionMsg::GenerateCompleted { ticket, result }.into());
                });
            }
            Cmd::RefactorCode { ticket, request } => {
                let services = Arc::clone(&self.services);
                let tx = self.msg_tx.clone();
                self.spawn_tracked(async move {
                    let result = services.refactor(&request).await;
                    let _ = tx.send(ActionMsg::RefactorCompleted { ticket, result }.into());
                });
            }
            Cmd::ReportUsage { kind, report } => {
                let services = Arc::clone(&self.services);
                let tx = self.msg_tx.clone();
                self.spawn_tracked(async move {
                    let result = services.report_usage(kind, &report).await;
                    let _ = tx.send(ActionMsg::UsageReported { kind, result }.into());
                });
            }

            // =================================================================
            // Host effects
            // =================================================================
            Cmd::PromptForDescription { serial, spec } => {
                let host = Arc::clone(&self.host);
                let tx = self.msg_tx.clone();
                self.spawn_tracked(async move {
                    let answer = host.prompt(spec).await;
                    let _ = tx.send(ActionMsg::PromptSubmitted { serial, answer }.into());
                });
            }
            Cmd::Navigate(route) => {
                self.show(route);
            }
            Cmd::ScrollToOutput => self.host.scroll_to_output(),
            Cmd::WriteClipboard { text } => {
                let host = Arc::clone(&self.host);
                let tx = self.msg_tx.clone();
                self.spawn_tracked(async move {
                    let result = host.write_clipboard(&text).await;
                    let _ = tx.send(ClipboardMsg::WriteCompleted(result).into());
                });
            }
            Cmd::ScheduleClipboardReset {
                generation,
                delay_ms,
            } => {
                if let Some(previous) = self.clipboard_reset.take() {
                    previous.abort();
                }
                let tx = self.msg_tx.clone();
                let deadline = tokio::time::Instant::now() + Duration::from_millis(delay_ms);
                let handle = self.spawn_tracked(async move {
                    tokio::time::sleep_until(deadline).await;
                    let _ = tx.send(ClipboardMsg::ResetElapsed { generation }.into());
                });
                self.clipboard_reset = Some(handle);
            }
            Cmd::SaveDownload(artifact) => {
                if let Err(e) = self.host.save_download(&artifact) {
                    tracing::warn!("Failed to save {}: {}", artifact.file_name, e);
                }
            }
            Cmd::ShowNotification(notification) => self.host.notify(&notification),
        }
    }
}
