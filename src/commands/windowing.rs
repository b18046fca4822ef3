use anyhow::Context;
use tauri::{AppHandle, Manager, WebviewWindow};

use hamaguri_overlay::config::window::SETTINGS_LABEL;

use crate::overlay_window;

/// Show and focus the settings window
pub(crate) fn show_settings_window(app: &AppHandle) -> anyhow::Result<()> {
    let window = app
        .get_webview_window(SETTINGS_LABEL)
        .context("Settings window not found")?;
    window.show()?;
    window.set_focus()?;
    Ok(())
}

#[tauri::command]
pub fn open_settings(app: AppHandle) -> Result<(), String> {
    show_settings_window(&app).map_err(|e| format!("{:#}", e))
}

/// Hide the calling window (settings close button)
#[tauri::command]
pub fn hide_window(window: WebviewWindow) -> Result<(), String> {
    tracing::debug!(label = window.label(), "Hiding window");
    window.hide().map_err(|e| e.to_string())
}

/// Same as the global shortcut; returns the new overlay visibility
#[tauri::command]
pub fn toggle_overlay(app: AppHandle) -> Result<bool, String> {
    overlay_window::toggle_overlay(&app).map_err(|e| format!("{:#}", e))
}
