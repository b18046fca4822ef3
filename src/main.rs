// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_bootstrap;
mod app_lifecycle;
mod app_state;
mod commands;
mod logging;
mod overlay_window;
mod platform;
mod shortcuts;
mod tray;

pub(crate) use app_state::AppState;

fn main() {
    let settings = app_bootstrap::load_initial_settings();
    app_bootstrap::init_logging(&settings);
    app_bootstrap::install_panic_hook();
    app_bootstrap::log_active_settings(&settings);

    let app_state = app_bootstrap::build_app_state(settings);

    tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(app_bootstrap::setup)
        .manage(app_state.clone())
        .invoke_handler(commands::handlers())
        .on_window_event(move |window, event| {
            app_lifecycle::handle_window_event(&app_state, window, event);
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");

    tracing::info!("Application exiting normally");
}
