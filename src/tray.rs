use tauri::menu::{Menu, MenuEvent, MenuItem};
use tauri::tray::TrayIconBuilder;
use tauri::AppHandle;

use crate::commands::windowing::show_settings_window;

/// Id of the tray icon declared in tauri.conf.json
const TRAY_ID: &str = "main";

const MENU_SETTINGS: &str = "show";
const MENU_QUIT: &str = "quit";

fn on_menu_event(app: &AppHandle, event: MenuEvent) {
    match event.id.as_ref() {
        MENU_QUIT => {
            tracing::info!("Quit requested from tray");
            app.exit(0);
        }
        MENU_SETTINGS => {
            if let Err(e) = show_settings_window(app) {
                tracing::warn!(error = %format!("{:#}", e), "Failed to open settings from tray");
            }
        }
        other => tracing::debug!(id = other, "Unhandled tray menu event"),
    }
}

/// Attach the "Settings" / "Quit" menu to the tray icon
pub(crate) fn install_tray(app: &AppHandle) -> tauri::Result<()> {
    let settings_item = MenuItem::with_id(app, MENU_SETTINGS, "Settings", true, None::<&str>)?;
    let quit_item = MenuItem::with_id(app, MENU_QUIT, "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&settings_item, &quit_item])?;

    if let Some(tray) = app.tray_by_id(TRAY_ID) {
        tray.set_menu(Some(menu))?;
        tray.on_menu_event(on_menu_event);
        tracing::debug!("Tray menu attached");
        return Ok(());
    }

    // No tray in the config: build one
    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip("Hamaguri")
        .menu(&menu)
        .on_menu_event(on_menu_event);
    match app.default_window_icon() {
        Some(icon) => builder = builder.icon(icon.clone()),
        None => tracing::warn!("No default window icon, tray icon will be blank"),
    }
    builder.build(app)?;

    tracing::debug!("Tray icon installed");
    Ok(())
}
