use tauri::State;

use hamaguri_overlay::settings::{blur_label, clamp_blur, Settings};

use crate::{logging, shortcuts, AppState};

#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<Settings, String> {
    let settings = state
        .settings
        .lock()
        .map_err(|_| "Settings lock poisoned".to_string())?;
    Ok(settings.clone())
}

/// Store the blur slider value and return its label text.
///
/// The overlay does not render blur yet; only the value is kept.
#[tauri::command]
pub async fn set_blur_intensity(value: u32, state: State<'_, AppState>) -> Result<String, String> {
    let clamped = clamp_blur(value);
    {
        let mut settings = state
            .settings
            .lock()
            .map_err(|_| "Settings lock poisoned".to_string())?;
        settings.blur_intensity = clamped;
    }
    tracing::debug!(requested = value, stored = clamped, "Blur intensity updated");
    Ok(blur_label(clamped))
}

#[tauri::command]
pub async fn set_log_level(level: String, state: State<'_, AppState>) -> Result<(), String> {
    let parsed = level.parse::<logging::LogLevel>()?;
    let normalized = parsed.as_setting();

    let log_to_file = {
        let mut settings = state
            .settings
            .lock()
            .map_err(|_| "Settings lock poisoned".to_string())?;
        if settings.log_level == normalized {
            return Ok(());
        }
        tracing::info!(old_level = %settings.log_level, new_level = normalized, "Log level changed");
        settings.log_level = normalized.to_string();
        settings.log_to_file
    };

    logging::init_logging(parsed, log_to_file).map_err(|e| format!("{:#}", e))
}

/// Re-register the overlay toggle; the old accelerator stays on failure
#[tauri::command]
pub async fn set_toggle_shortcut(
    accelerator: String,
    state: State<'_, AppState>,
    app: tauri::AppHandle,
) -> Result<(), String> {
    let previous = state
        .settings
        .lock()
        .map_err(|_| "Settings lock poisoned".to_string())?
        .toggle_shortcut
        .clone();

    shortcuts::apply_shortcuts(&app, &accelerator, Some(&previous))?;

    let mut settings = state
        .settings
        .lock()
        .map_err(|_| "Settings lock poisoned".to_string())?;
    settings.toggle_shortcut = accelerator;
    Ok(())
}
