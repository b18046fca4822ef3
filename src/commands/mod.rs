pub mod settings;
pub mod surface;
pub mod system;
pub mod windowing;

pub fn handlers() -> impl Fn(tauri::ipc::Invoke<tauri::Wry>) -> bool + Send + Sync + 'static {
    tauri::generate_handler![
        surface::surface_ready,
        surface::js_log,
        settings::get_settings,
        settings::set_blur_intensity,
        settings::set_log_level,
        settings::set_toggle_shortcut,
        windowing::open_settings,
        windowing::hide_window,
        windowing::toggle_overlay,
        system::get_app_version,
        system::is_dev_mode,
    ]
}
