//! Application Configuration Constants
//!
//! Centralized configuration for the magic numbers, labels, timings and defaults
//! used by the overlay core and the host shell.

/// Window labels and titles
pub mod window {
    /// Label of the transparent click-through overlay window
    pub const OVERLAY_LABEL: &str = "overlay";

    /// Label of the settings window (declared in tauri.conf.json)
    pub const SETTINGS_LABEL: &str = "main";

    /// Title of the overlay window
    pub const OVERLAY_TITLE: &str = "hamaguri-blur-overlay";

    /// Page loaded by both windows
    pub const ENTRY_PAGE: &str = "index.html";
}

/// Hole tracking loop
pub mod tracking {
    /// Nominal refresh period of the overlay loop (milliseconds)
    pub const REFRESH_INTERVAL_MS: u64 = 100;

    /// Lower bound accepted for a configured refresh period (milliseconds)
    pub const MIN_REFRESH_INTERVAL_MS: u64 = 16;

    /// Event emitted to the overlay webview with the current visual state
    pub const VISUAL_STATE_EVENT: &str = "overlay://visual-state";
}

/// Active window frame corrections (physical pixels)
pub mod frame {
    /// Pixels added on every side of the DWM visible frame bounds
    pub const FRAME_INFLATE_PX: i32 = 1;

    /// Horizontal correction applied after converting to overlay-local space.
    /// Compensates the invisible resize border left in the reported bounds.
    pub const OFFSET_X: i32 = -7;

    /// Vertical correction applied after converting to overlay-local space
    pub const OFFSET_Y: i32 = 0;

    /// Window classes belonging to the shell that never count as the active window
    pub const SYSTEM_WINDOW_CLASSES: &[&str] = &[
        "Progman",
        "WorkerW",
        "Shell_TrayWnd",
        "Shell_SecondaryTrayWnd",
        "Windows.UI.Core.CoreWindow",
    ];

    /// Class name fragments that mark edge/charm input windows
    pub const SYSTEM_WINDOW_CLASS_FRAGMENTS: &[&str] = &["EdgeUiInputTopWndClass"];

    /// Transient popup classes skipped while walking the z-order
    pub const POPUP_WINDOW_CLASSES: &[&str] = &["ComboBox", "tooltips_class32"];
}

/// Blur control (settings UI only, not yet wired to rendering)
pub mod blur {
    pub const MIN_BLUR_PX: u32 = 0;
    pub const MAX_BLUR_PX: u32 = 50;
    pub const DEFAULT_BLUR_PX: u32 = 10;
}

/// Shortcuts
pub mod shortcuts {
    /// Toggles overlay visibility
    pub const DEFAULT_TOGGLE_OVERLAY: &str = "Alt+B";
}

/// Logging defaults
pub mod logging {
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// Log retention period in days
    pub const LOG_RETENTION_DAYS: u32 = 7;
}

/// Environment variables read by [`crate::settings::Settings::from_env`]
pub mod env {
    pub const LOG_LEVEL: &str = "HAMAGURI_LOG_LEVEL";
    pub const LOG_TO_FILE: &str = "HAMAGURI_LOG_TO_FILE";
    pub const LOG_RETENTION_DAYS: &str = "HAMAGURI_LOG_RETENTION_DAYS";
    pub const REFRESH_MS: &str = "HAMAGURI_REFRESH_MS";
    pub const EVENT_DRIVEN: &str = "HAMAGURI_EVENT_DRIVEN";
    pub const TOGGLE_SHORTCUT: &str = "HAMAGURI_TOGGLE_SHORTCUT";
    pub const BLUR: &str = "HAMAGURI_BLUR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_bounds() {
        assert!(tracking::MIN_REFRESH_INTERVAL_MS <= tracking::REFRESH_INTERVAL_MS);
    }

    #[test]
    fn test_blur_range_contains_default() {
        assert!((blur::MIN_BLUR_PX..=blur::MAX_BLUR_PX).contains(&blur::DEFAULT_BLUR_PX));
    }

    #[test]
    fn test_overlay_and_settings_labels_differ() {
        assert_ne!(window::OVERLAY_LABEL, window::SETTINGS_LABEL);
    }
}
