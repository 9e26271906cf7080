//! Copy-to-clipboard feedback state

/// How long the copy result stays visible before resetting
pub const CLIPBOARD_RESET_MS: u64 = 1500;

/// State of the copy control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardState {
    #[default]
    Idle,
    Copying,
    Copied,
    Error,
}

impl ClipboardState {
    /// Label shown on the copy control
    pub fn label(self) -> &'static str {
        match self {
            ClipboardState::Idle => "Copy",
            ClipboardState::Copying => "Copying...",
            ClipboardState::Copied => "Copied!",
            ClipboardState::Error => "Error!",
        }
    }
}

/// Clipboard feedback: the visible state plus the generation of the one
/// reset that is allowed to fire
#[derive(Debug, Clone, Default)]
pub struct ClipboardFeedback {
    pub state: ClipboardState,
    reset_generation: u64,
}

impl ClipboardFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Copying`. Returns false while a copy is already in progress.
    ///
    /// A reset still pending from the previous copy is void from here on.
    pub fn begin_copy(&mut self) -> bool {
        if self.state == ClipboardState::Copying {
            return false;
        }
        self.state = ClipboardState::Copying;
        self.reset_generation += 1;
        true
    }

    /// Record the clipboard write result and return the generation of the
    /// reset that must now be scheduled. Any earlier reset is superseded.
    pub fn finish_copy(&mut self, success: bool) -> u64 {
        self.state = if success {
            ClipboardState::Copied
        } else {
            ClipboardState::Error
        };
        self.reset_generation += 1;
        self.reset_generation
    }

    /// Apply a reset timer. Returns false if the timer was superseded.
    pub fn reset(&mut self, generation: u64) -> bool {
        if generation != self.reset_generation {
            return false;
        }
        self.state = ClipboardState::Idle;
        true
    }

    pub fn reset_generation(&self) -> u64 {
        self.reset_generation
    }
}
