use hamaguri_overlay::config::window::OVERLAY_LABEL;
use hamaguri_overlay::RefreshReason;

use crate::AppState;

pub(crate) fn handle_window_event(
    app_state: &AppState,
    window: &tauri::Window,
    event: &tauri::WindowEvent,
) {
    let is_overlay = window.label() == OVERLAY_LABEL;

    match event {
        tauri::WindowEvent::CloseRequested { api, .. } => {
            // Windows only go away through the tray's Quit
            tracing::info!(label = window.label(), "Window close requested, hiding instead");
            api.prevent_close();
            if let Err(e) = window.hide() {
                tracing::warn!(label = window.label(), error = %e, "Failed to hide window");
            }
        }
        tauri::WindowEvent::Moved(_) if is_overlay => {
            app_state.refresh.request(RefreshReason::SurfaceMoved);
        }
        tauri::WindowEvent::Resized(_) if is_overlay => {
            app_state.refresh.request(RefreshReason::SurfaceMoved);
        }
        tauri::WindowEvent::ScaleFactorChanged { scale_factor, .. } if is_overlay => {
            tracing::debug!(scale_factor, "Overlay scale factor changed");
            app_state.refresh.request(RefreshReason::ScaleChanged);
        }
        tauri::WindowEvent::Destroyed => {
            tracing::info!(label = window.label(), "Window destroyed");
        }
        _ => {}
    }
}
