use tauri::{AppHandle, State, WebviewWindow};

use hamaguri_overlay::{RefreshReason, SurfaceLayout};

use crate::overlay_window::{start_overlay_loop, TauriScaleResolver};
use crate::AppState;

/// Startup routine shared by both windows; the label decides the role.
///
/// Safe to call again after a reload: the first layout is returned and no
/// second loop is started.
#[tauri::command]
pub fn surface_ready(
    app: AppHandle,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> SurfaceLayout {
    let label = window.label().to_string();
    tracing::debug!(label = %label, "Init called");

    let scale = TauriScaleResolver::new(window.clone());
    let layout = state
        .surfaces
        .initialize(&label, &scale, || start_overlay_loop(&app, &window, &state));

    // A reloaded overlay page starts blank; have the loop send its state again
    if layout.tracking {
        state.refresh.request(RefreshReason::Manual);
    }
    layout
}

/// Forward a message from the webview scripts into the log
#[tauri::command]
pub fn js_log(window: WebviewWindow, message: String, level: Option<String>) {
    let label = window.label();
    match level.as_deref() {
        Some("error") => tracing::error!(target: "frontend", window = label, "{}", message),
        Some("warn") => tracing::warn!(target: "frontend", window = label, "{}", message),
        Some("debug") => tracing::debug!(target: "frontend", window = label, "{}", message),
        _ => tracing::info!(target: "frontend", window = label, "{}", message),
    }
}
