use std::sync::{Arc, Mutex};

use tauri::{App, Manager};

use hamaguri_overlay::refresh_channel;
use hamaguri_overlay::settings::Settings;
use hamaguri_overlay::SurfaceRegistry;

use crate::{logging, overlay_window, shortcuts, tray, AppState};

/// Settings from defaults and environment overrides
pub(crate) fn load_initial_settings() -> Settings {
    Settings::from_env()
}

/// Initialize logging system.
pub(crate) fn init_logging(initial_settings: &Settings) {
    let log_level = initial_settings
        .log_level
        .parse::<logging::LogLevel>()
        .unwrap_or(logging::LogLevel::Info);

    if let Err(e) = logging::init_logging(log_level, initial_settings.log_to_file) {
        eprintln!("Failed to initialize logging: {:#}", e);
    } else {
        tracing::info!("***********************************************************************");
        tracing::info!("*                         HAMAGURI STARTUP                            *");
        tracing::info!("***********************************************************************");
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            platform = std::env::consts::OS,
            log_level = %log_level,
            "Application started"
        );
        tracing::debug!(
            os = std::env::consts::OS,
            arch = std::env::consts::ARCH,
            "Platform details"
        );
    }

    if initial_settings.log_to_file {
        logging::auto_cleanup_old_logs(initial_settings.log_retention_days);
    }
}

/// Log panics through tracing before the default hook runs.
pub(crate) fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(%panic_info, "Application panic detected");
        default_panic(panic_info);
    }));
}

/// Log active settings for debugging.
pub(crate) fn log_active_settings(settings: &Settings) {
    tracing::debug!(
        blur_intensity = settings.blur_intensity,
        refresh_mode = ?settings.refresh_mode,
        toggle_shortcut = %settings.toggle_shortcut,
        log_level = %settings.log_level,
        log_to_file = settings.log_to_file,
        log_retention_days = settings.log_retention_days,
        "Settings configuration"
    );
}

pub(crate) fn build_app_state(settings: Settings) -> AppState {
    let (refresh, source) = refresh_channel(settings.refresh_mode);
    tracing::debug!(mode = ?settings.refresh_mode, "Refresh source created");

    AppState {
        settings: Arc::new(Mutex::new(settings)),
        surfaces: Arc::new(SurfaceRegistry::new()),
        refresh,
        refresh_source: Arc::new(Mutex::new(Some(source))),
    }
}

/// Create the overlay window, register the shortcut and install the tray.
///
/// Only the overlay window is required; the shortcut and tray degrade to a
/// warning.
pub(crate) fn setup(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    let handle = app.handle().clone();
    overlay_window::create_overlay_window(&handle)?;

    let toggle_shortcut = handle
        .state::<AppState>()
        .settings
        .lock()
        .map(|settings| settings.toggle_shortcut.clone())
        .unwrap_or_default();
    if let Err(e) = shortcuts::apply_shortcuts(&handle, &toggle_shortcut, None) {
        tracing::warn!(error = %e, "Failed to register shortcuts");
    }

    if let Err(e) = tray::install_tray(&handle) {
        tracing::warn!(error = %e, "Failed to install tray icon");
    }

    tracing::debug!("Initialization complete");
    Ok(())
}
