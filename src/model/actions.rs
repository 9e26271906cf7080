//! Remote action bookkeeping
//!
//! Tracks which remote actions are in flight, who invoked them, and which
//! buffer revision each one was issued against.

use crate::auth::AuthContext;

/// An independently loading-tracked remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Run,
    Generate,
    Refactor,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [ActionKind::Run, ActionKind::Generate, ActionKind::Refactor];

    fn index(self) -> usize {
        match self {
            ActionKind::Run => 0,
            ActionKind::Generate => 1,
            ActionKind::Refactor => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Run => "run",
            ActionKind::Generate => "generate",
            ActionKind::Refactor => "refactor",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Loading state of one action kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Pending,
}

impl LoadingState {
    pub fn is_pending(self) -> bool {
        matches!(self, LoadingState::Pending)
    }
}

/// Identifies the session state an action was issued against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub language: String,
    pub revision: u64,
}

/// Loading flags for every action kind
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    loading: [LoadingState; 3],
    /// Identity captured when each pending action was invoked
    invoked_by: [Option<AuthContext>; 3],
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self, kind: ActionKind) -> LoadingState {
        self.loading[kind.index()]
    }

    pub fn is_pending(&self, kind: ActionKind) -> bool {
        self.loading(kind).is_pending()
    }

    /// Move `kind` from idle to pending on behalf of `auth`
    ///
    /// Returns false (and changes nothing) if the kind is already pending.
    pub fn begin(&mut self, kind: ActionKind, auth: AuthContext) -> bool {
        let i = kind.index();
        if self.loading[i].is_pending() {
            return false;
        }
        self.loading[i] = LoadingState::Pending;
        self.invoked_by[i] = Some(auth);
        true
    }

    /// Return `kind` to idle, handing back the identity it was invoked with
    pub fn finish(&mut self, kind: ActionKind) -> Option<AuthContext> {
        let i = kind.index();
        self.loading[i] = LoadingState::Idle;
        self.invoked_by[i].take()
    }

    /// True while a buffer-replacing action is in flight
    pub fn locks_buffer(&self) -> bool {
        self.is_pending(ActionKind::Generate) || self.is_pending(ActionKind::Refactor)
    }

    pub fn any_pending(&self) -> bool {
        ActionKind::ALL.iter().any(|&kind| self.is_pending(kind))
    }
}
