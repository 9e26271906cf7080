//! Viewport-driven presentation settings
//!
//! The editor adapts its font size and code folding to the width of the
//! viewport. The profile is recomputed on every resize and never persisted.

/// Viewport widths above this are desktop
pub const DESKTOP_MIN_EXCLUSIVE: u32 = 1024;
/// Viewport widths above this (and up to the desktop bound) are tablet
pub const TABLET_MIN_EXCLUSIVE: u32 = 768;

/// Device category derived from viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceProfile {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceProfile {
    /// Classify a viewport width in CSS pixels
    pub fn classify(width: u32) -> Self {
        if width > DESKTOP_MIN_EXCLUSIVE {
            DeviceProfile::Desktop
        } else if width > TABLET_MIN_EXCLUSIVE {
            DeviceProfile::Tablet
        } else {
            DeviceProfile::Mobile
        }
    }

    /// Editor font size in pixels
    pub fn font_size(self) -> u16 {
        match self {
            DeviceProfile::Desktop => 16,
            DeviceProfile::Tablet => 14,
            DeviceProfile::Mobile => 12,
        }
    }

    /// Whether code folding is enabled (disabled on mobile)
    pub fn folding(self) -> bool {
        !matches!(self, DeviceProfile::Mobile)
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceProfile::Desktop => "desktop",
            DeviceProfile::Tablet => "tablet",
            DeviceProfile::Mobile => "mobile",
        }
    }
}

/// Everything the editing widget needs to render the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPresentation {
    pub font_size: u16,
    pub folding: bool,
    pub read_only: bool,
    /// Highlighting mode for the widget (see `languages::editor_mode`)
    pub mode: String,
}
