//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::download::DownloadArtifact;
use crate::model::{ActionKind, Notification, PromptSpec, Ticket};
use crate::routes::Route;
use crate::services::{GenerateRequest, SourceRequest, UsageReport};

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Cmd>),

    // === Remote Calls ===
    /// Sends Msg::Action(RunCompleted) when done
    ExecuteCode {
        ticket: Ticket,
        request: SourceRequest,
    },
    /// Sends Msg::Action(GenerateCompleted) when done
    GenerateCode {
        ticket: Ticket,
        request: GenerateRequest,
    },
    /// Sends Msg::Action(RefactorCompleted) when done
    RefactorCode {
        ticket: Ticket,
        request: SourceRequest,
    },
    /// Fire-and-forget usage count. Sends Msg::Action(UsageReported).
    ReportUsage { kind: ActionKind, report: UsageReport },

    // === Host Effects ===
    /// Show the free-text prompt. Sends Msg::Action(PromptSubmitted)
    /// tagged with `serial`.
    PromptForDescription { serial: u64, spec: PromptSpec },
    /// Leave the editor for another page
    Navigate(Route),
    /// Bring the output region into view
    ScrollToOutput,
    /// Sends Msg::Clipboard(WriteCompleted) when done
    WriteClipboard { text: String },
    /// Replace the pending reset timer. After delay_ms, sends
    /// Msg::Clipboard(ResetElapsed).
    ScheduleClipboardReset { generation: u64, delay_ms: u64 },
    /// Hand a file to the host
    SaveDownload(DownloadArtifact),
    ShowNotification(Notification),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn navigate(route: Route) -> Self {
        Cmd::Navigate(route)
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// True if this command (or any batched command) calls a remote service
    pub fn is_remote(&self) -> bool {
        match self {
            Cmd::ExecuteCode { .. }
            | Cmd::GenerateCode { .. }
            | Cmd::RefactorCode { .. }
            | Cmd::ReportUsage { .. } => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_remote),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_batches() {
        let cmd = Cmd::batch(vec![
            Cmd::ScrollToOutput,
            Cmd::None,
            Cmd::batch(vec![Cmd::navigate(Route::Login)]),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![Cmd::ScrollToOutput, Cmd::Navigate(Route::Login)]
        );
    }

    #[test]
    fn test_is_remote() {
        assert!(!Cmd::ScrollToOutput.is_remote());
        let report = Cmd::ReportUsage {
            kind: ActionKind::Run,
            report: UsageReport {
                username: "alice".into(),
                language: "go".into(),
            },
        };
        assert!(Cmd::batch(vec![Cmd::ScrollToOutput, report]).is_remote());
    }
}
