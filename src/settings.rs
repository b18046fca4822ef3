use serde::{Deserialize, Serialize};

use crate::config;
use crate::refresh::RefreshMode;

/// Runtime settings.
///
/// Built from defaults and environment overrides at startup; never written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    // Overlay
    #[serde(default = "default_blur_intensity")]
    pub blur_intensity: u32,
    #[serde(default)]
    pub refresh_mode: RefreshMode,
    #[serde(default = "default_toggle_shortcut")]
    pub toggle_shortcut: String,

    // Logging
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blur_intensity: default_blur_intensity(),
            refresh_mode: RefreshMode::default(),
            toggle_shortcut: default_toggle_shortcut(),
            log_level: default_log_level(),
            log_to_file: false,
            log_retention_days: default_log_retention_days(),
        }
    }
}

fn default_blur_intensity() -> u32 {
    config::blur::DEFAULT_BLUR_PX
}

fn default_toggle_shortcut() -> String {
    config::shortcuts::DEFAULT_TOGGLE_OVERLAY.to_string()
}

fn default_log_level() -> String {
    config::logging::DEFAULT_LOG_LEVEL.to_string()
}

fn default_log_retention_days() -> u32 {
    config::logging::LOG_RETENTION_DAYS
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Defaults overridden by `HAMAGURI_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through `lookup`; unparsable values are ignored
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        use config::env;

        let mut settings = Settings::default();

        if let Some(level) = lookup(env::LOG_LEVEL) {
            settings.log_level = level.trim().to_string();
        }
        if let Some(flag) = lookup(env::LOG_TO_FILE).as_deref().and_then(parse_flag) {
            settings.log_to_file = flag;
        }
        if let Some(days) = lookup(env::LOG_RETENTION_DAYS).and_then(|v| v.trim().parse().ok()) {
            settings.log_retention_days = days;
        }
        if let Some(shortcut) = lookup(env::TOGGLE_SHORTCUT) {
            if !shortcut.trim().is_empty() {
                settings.toggle_shortcut = shortcut.trim().to_string();
            }
        }
        if let Some(blur) = lookup(env::BLUR).and_then(|v| v.trim().parse().ok()) {
            settings.blur_intensity = clamp_blur(blur);
        }

        let event_driven = lookup(env::EVENT_DRIVEN)
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(false);
        settings.refresh_mode = if event_driven {
            RefreshMode::EventDriven
        } else {
            let period_ms = lookup(env::REFRESH_MS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|ms| ms.max(config::tracking::MIN_REFRESH_INTERVAL_MS))
                .unwrap_or(config::tracking::REFRESH_INTERVAL_MS);
            RefreshMode::Polling { period_ms }
        };

        settings
    }
}

/// Clamp a blur value into the slider range
pub fn clamp_blur(value: u32) -> u32 {
    value.clamp(config::blur::MIN_BLUR_PX, config::blur::MAX_BLUR_PX)
}

/// Text shown next to the blur slider
pub fn blur_label(value: u32) -> String {
    format!("{}px", value)
}
