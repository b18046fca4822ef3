use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use crate::overlay_window;

#[derive(Clone, Copy, Debug)]
pub enum ShortcutAction {
    ToggleOverlay,
}

impl ShortcutAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutAction::ToggleOverlay => "toggle_overlay",
        }
    }

    fn run(self, app: &tauri::AppHandle) {
        match self {
            ShortcutAction::ToggleOverlay => {
                if let Err(e) = overlay_window::toggle_overlay(app) {
                    tracing::warn!(error = %format!("{:#}", e), "Failed to toggle overlay");
                }
            }
        }
    }
}

fn register_one(
    app: &tauri::AppHandle,
    accelerator: &str,
    action: ShortcutAction,
) -> Result<(), String> {
    if accelerator.trim().is_empty() {
        tracing::debug!(action = action.as_str(), "No accelerator configured");
        return Ok(());
    }

    let action_name = action.as_str();
    app.global_shortcut()
        .on_shortcut(accelerator, move |app_handle, _shortcut, event| {
            // Release events would toggle a second time
            if event.state() == ShortcutState::Pressed {
                tracing::debug!(action = action_name, "Shortcut pressed");
                action.run(app_handle);
            }
        })
        .map_err(|e| format!("Failed to register {} ({}): {}", action_name, accelerator, e))?;

    tracing::info!(action = action_name, accelerator, "Shortcut registered");
    Ok(())
}

/// Register the overlay toggle, replacing whatever was registered before.
///
/// On failure the `previous` accelerator is restored when given.
pub fn apply_shortcuts(
    app: &tauri::AppHandle,
    toggle_overlay: &str,
    previous: Option<&str>,
) -> Result<(), String> {
    if let Err(e) = app.global_shortcut().unregister_all() {
        tracing::warn!(error = %e, "Failed to clear global shortcuts");
    }

    if let Err(e) = register_one(app, toggle_overlay, ShortcutAction::ToggleOverlay) {
        tracing::warn!(error = %e, "Shortcut registration failed, rolling back");
        if let Err(err) = app.global_shortcut().unregister_all() {
            tracing::warn!(error = %err, "Failed to clear shortcuts after rollback");
        }

        if let Some(prev) = previous {
            if let Err(err) = register_one(app, prev, ShortcutAction::ToggleOverlay) {
                tracing::warn!(error = %err, "Failed to restore previous shortcut");
            }
        }
        return Err(e);
    }

    Ok(())
}
