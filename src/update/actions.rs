//! Remote action update handlers
//!
//! Run, generate and refactor each follow the same shape: gate, mark
//! pending, emit a remote command, then on completion clear the pending flag
//! unconditionally and fold the result into the session. Results issued
//! against a buffer that has since changed are dropped instead of applied.

use crate::auth::AuthContext;
use crate::commands::Cmd;
use crate::messages::ActionMsg;
use crate::model::{ActionKind, AppModel, Notification, Ticket, GENERATE_PROMPT};
use crate::routes::Route;
use crate::services::{
    CodeResponse, GenerateRequest, OutputResponse, ServiceError, SourceRequest, UsageReport,
};

/// Output when the execution service answered without output
pub const NO_OUTPUT_RETURNED: &str = "No output returned.";
/// Output when the execution service could not be reached
pub const RUN_FAILED: &str = "Failed!! try again.";
pub const NO_CODE_GENERATED: &str = "No code generated.";
pub const NO_REFACTORED_CODE: &str = "No refactored code returned.";
pub const CODE_GENERATION_FAILED: &str = "Failed to generate code.";
pub const REFACTOR_FAILED: &str = "Failed to refactor code.";

const ERROR_TITLE: &str = "Error";

/// Handle remote action messages
pub fn update_actions(model: &mut AppModel, msg: ActionMsg) -> Option<Cmd> {
    match msg {
        ActionMsg::Run(auth) => start_run(model, auth),
        ActionMsg::RunCompleted { ticket, result } => complete_run(model, ticket, result),

        ActionMsg::Generate(auth) => open_generate_prompt(model, auth),
        ActionMsg::PromptSubmitted { serial, answer } => start_generate(model, serial, answer),
        ActionMsg::GenerateCompleted { ticket, result } => {
            complete_replacement(model, ActionKind::Generate, ticket, result)
        }

        ActionMsg::Refactor(auth) => start_refactor(model, auth),
        ActionMsg::RefactorCompleted { ticket, result } => {
            complete_replacement(model, ActionKind::Refactor, ticket, result)
        }

        ActionMsg::UsageReported { kind, result } => {
            match result {
                Ok(()) => tracing::debug!("Usage report for {} accepted", kind),
                Err(e) => tracing::debug!("Usage report for {} dropped: {}", kind, e),
            }
            None
        }
    }
}

/// Treat an empty payload the same as a missing one
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn usage_report(kind: ActionKind, language: &str, auth: &AuthContext) -> Option<Cmd> {
    if !auth.is_authenticated() {
        return None;
    }
    Some(Cmd::ReportUsage {
        kind,
        report: UsageReport {
            username: auth.username().unwrap_or_default().to_string(),
            language: language.to_string(),
        },
    })
}

// ============================================================================
// Run
// ============================================================================

fn start_run(model: &mut AppModel, auth: AuthContext) -> Option<Cmd> {
    if model.session.is_empty() {
        tracing::debug!("Run ignored: buffer is empty");
        return None;
    }
    if !model.actions.begin(ActionKind::Run, auth) {
        tracing::debug!("Run ignored: already pending");
        return None;
    }

    let request = SourceRequest {
        language: model.language().to_string(),
        code: model.session.code.clone(),
    };
    tracing::info!("Running {} ({} bytes)", request.language, request.code.len());
    Some(Cmd::ExecuteCode {
        ticket: model.ticket(),
        request,
    })
}

fn complete_run(
    model: &mut AppModel,
    ticket: Ticket,
    result: Result<OutputResponse, ServiceError>,
) -> Option<Cmd> {
    let auth = model.actions.finish(ActionKind::Run).unwrap_or_default();

    let (output, succeeded) = match result {
        Ok(response) => (
            non_empty(response.output).unwrap_or_else(|| NO_OUTPUT_RETURNED.to_string()),
            true,
        ),
        Err(e) => {
            tracing::warn!("Run failed: {}", e);
            let output = match e.server_text() {
                Some(text) => format!("Error: {}", text),
                None => RUN_FAILED.to_string(),
            };
            (output, false)
        }
    };

    let mut cmds = Vec::new();
    if ticket.language == model.session.language {
        model.set_output(output);
    } else {
        tracing::debug!(
            "Dropping run output for {}: now editing {}",
            ticket.language,
            model.session.language
        );
    }
    if succeeded {
        if let Some(report) = usage_report(ActionKind::Run, &ticket.language, &auth) {
            cmds.push(report);
        }
    }
    cmds.push(Cmd::ScrollToOutput);
    Some(Cmd::batch(cmds))
}

// ============================================================================
// Generate
// ============================================================================

fn open_generate_prompt(model: &mut AppModel, auth: AuthContext) -> Option<Cmd> {
    if !auth.is_authenticated() {
        tracing::debug!("Generate requires login; redirecting");
        return Some(Cmd::navigate(Route::Login));
    }
    if model.actions.is_pending(ActionKind::Generate) || model.ui.is_prompt_open() {
        tracing::debug!("Generate ignored: already in progress");
        return None;
    }

    let serial = model.ui.open_prompt(auth);
    Some(Cmd::PromptForDescription {
        serial,
        spec: GENERATE_PROMPT,
    })
}

fn start_generate(model: &mut AppModel, serial: u64, description: Option<String>) -> Option<Cmd> {
    let Some(auth) = model.ui.take_prompt(serial) else {
        tracing::debug!("Ignoring answer to closed prompt {}", serial);
        return None;
    };

    let Some(description) = non_empty(description) else {
        tracing::debug!("Generate abandoned at prompt");
        return None;
    };
    if !model.actions.begin(ActionKind::Generate, auth) {
        return None;
    }

    let request = GenerateRequest {
        problem_description: description,
        language: model.language().to_string(),
    };
    tracing::info!("Generating {} code", request.language);
    Some(Cmd::GenerateCode {
        ticket: model.ticket(),
        request,
    })
}

// ============================================================================
// Refactor
// ============================================================================

fn start_refactor(model: &mut AppModel, auth: AuthContext) -> Option<Cmd> {
    if !auth.is_authenticated() {
        tracing::debug!("Refactor requires login; redirecting");
        return Some(Cmd::navigate(Route::Login));
    }
    if model.session.is_empty() || model.language().is_empty() {
        tracing::debug!("Refactor ignored: nothing to refactor");
        return None;
    }
    if !model.actions.begin(ActionKind::Refactor, auth) {
        tracing::debug!("Refactor ignored: already pending");
        return None;
    }

    let request = SourceRequest {
        language: model.language().to_string(),
        code: model.session.code.clone(),
    };
    tracing::info!("Refactoring {} ({} bytes)", request.language, request.code.len());
    Some(Cmd::RefactorCode {
        ticket: model.ticket(),
        request,
    })
}

// ============================================================================
// Generate / Refactor completion
// ============================================================================

/// Fold a generate or refactor response into the code buffer
fn complete_replacement(
    model: &mut AppModel,
    kind: ActionKind,
    ticket: Ticket,
    result: Result<CodeResponse, ServiceError>,
) -> Option<Cmd> {
    let auth = model.actions.finish(kind).unwrap_or_default();

    let (fallback, failure) = match kind {
        ActionKind::Refactor => (NO_REFACTORED_CODE, REFACTOR_FAILED),
        _ => (NO_CODE_GENERATED, CODE_GENERATION_FAILED),
    };

    match result {
        Ok(response) => {
            let code = non_empty(response.code).unwrap_or_else(|| fallback.to_string());
            if model.is_current(&ticket) {
                model.set_code(code);
            } else {
                tracing::debug!(
                    "Discarding stale {} result (issued at {}@{}, now {}@{})",
                    kind,
                    ticket.language,
                    ticket.revision,
                    model.session.language,
                    model.session.revision
                );
            }
            usage_report(kind, &ticket.language, &auth)
        }
        Err(e) => {
            tracing::warn!("{} failed: {}", kind, e);
            let notification = Notification::error(ERROR_TITLE, failure);
            model.ui.notification = Some(notification.clone());
            Some(Cmd::ShowNotification(notification))
        }
    }
}
