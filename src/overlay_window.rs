//! Overlay window host
//!
//! Creates the transparent click-through overlay and plugs the Tauri window
//! into the core's scale/provider/presenter seams.

use anyhow::{anyhow, Context, Result};
use tauri::{AppHandle, Emitter, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use hamaguri_overlay::config::frame::{OFFSET_X, OFFSET_Y};
use hamaguri_overlay::config::{tracking, window as labels};
use hamaguri_overlay::coords::{needs_resync, to_surface_local, MonitorBounds};
use hamaguri_overlay::geometry::PhysicalRect;
use hamaguri_overlay::traits::{ActiveRegionProvider, MaskPresenter, ScaleResolver};
use hamaguri_overlay::{OverlayLoop, OverlayVisualState};

use crate::platform;
use crate::AppState;

/// Native handle of `window` (HWND on Windows)
pub(crate) fn native_handle(window: &WebviewWindow) -> Option<isize> {
    #[cfg(windows)]
    {
        window.hwnd().ok().map(|hwnd| hwnd.0 as isize)
    }

    #[cfg(not(windows))]
    {
        let _ = window;
        None
    }
}

/// Make the overlay ignore mouse input, at both the webview and native level
pub(crate) fn apply_click_through(window: &WebviewWindow) {
    if let Err(e) = window.set_ignore_cursor_events(true) {
        tracing::warn!(error = %e, "Failed to ignore cursor events on overlay");
    }
    if let Some(hwnd) = native_handle(window) {
        platform::window::set_click_through(hwnd);
    }
}

pub(crate) fn create_overlay_window(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    let window = WebviewWindowBuilder::new(
        app,
        labels::OVERLAY_LABEL,
        WebviewUrl::App(labels::ENTRY_PAGE.into()),
    )
    .title(labels::OVERLAY_TITLE)
    .decorations(false)
    .transparent(true)
    .always_on_top(true)
    .skip_taskbar(true)
    .visible(false)
    .build()?;

    apply_click_through(&window);
    tracing::info!(label = labels::OVERLAY_LABEL, "Overlay window created");
    Ok(window)
}

/// Show or hide the overlay; returns the new visibility
pub(crate) fn toggle_overlay(app: &AppHandle) -> Result<bool> {
    let overlay = app
        .get_webview_window(labels::OVERLAY_LABEL)
        .context("Overlay window not found")?;

    if overlay.is_visible().unwrap_or(false) {
        overlay.hide()?;
        tracing::info!("Overlay hidden");
        return Ok(false);
    }

    // Click-through is re-applied every time the overlay is shown
    apply_click_through(&overlay);
    let shown_natively = match native_handle(&overlay) {
        Some(hwnd) => platform::window::show_no_activate(hwnd).is_ok(),
        None => false,
    };
    if !shown_natively {
        overlay.show()?;
    }
    tracing::info!("Overlay shown");
    Ok(true)
}

/// Scale factor and inner size of the overlay window
pub(crate) struct TauriScaleResolver {
    window: WebviewWindow,
}

impl TauriScaleResolver {
    pub(crate) fn new(window: WebviewWindow) -> Self {
        Self { window }
    }
}

impl ScaleResolver for TauriScaleResolver {
    fn scale_factor(&self) -> Result<f64> {
        Ok(self.window.scale_factor()?)
    }

    fn physical_size(&self) -> Result<(u32, u32)> {
        let size = self.window.inner_size()?;
        Ok((size.width, size.height))
    }
}

/// Foreground window in overlay-local physical pixels.
///
/// Also keeps the overlay on the monitor of the active window.
pub(crate) struct TauriActiveRegionProvider {
    window: WebviewWindow,
}

impl TauriActiveRegionProvider {
    pub(crate) fn new(window: WebviewWindow) -> Self {
        Self { window }
    }

    fn monitor_for(&self, rect: &PhysicalRect) -> Option<MonitorBounds> {
        let monitor = self
            .window
            .monitor_from_point(rect.left as f64, rect.top as f64)
            .ok()
            .flatten()?;
        let position = monitor.position();
        let size = monitor.size();

        let bounds = MonitorBounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        };
        self.resync_to(&bounds, monitor.name().map(|s| s.as_str()));
        Some(bounds)
    }

    /// Move/resize the overlay onto `monitor` if it is not already covering it
    fn resync_to(&self, monitor: &MonitorBounds, name: Option<&str>) {
        let (Ok(position), Ok(size)) = (self.window.outer_position(), self.window.inner_size())
        else {
            return;
        };
        if !needs_resync((position.x, position.y), (size.width, size.height), monitor) {
            return;
        }

        let _ = self
            .window
            .set_position(tauri::PhysicalPosition::new(monitor.x, monitor.y));
        let _ = self
            .window
            .set_size(tauri::PhysicalSize::new(monitor.width, monitor.height));
        apply_click_through(&self.window);

        tracing::info!(
            monitor = name.unwrap_or("unknown"),
            x = monitor.x,
            y = monitor.y,
            "Resynced overlay to monitor"
        );
    }
}

impl ActiveRegionProvider for TauriActiveRegionProvider {
    fn active_region(&self) -> Result<Option<PhysicalRect>> {
        let Some(active) = platform::foreground::find_active_window(native_handle(&self.window))?
        else {
            return Ok(None);
        };

        // The expected monitor origin is used rather than the overlay's own
        // position, so a few pixels of overlay drift never shift the hole.
        let origin = match self.monitor_for(&active.rect) {
            Some(monitor) => monitor.origin(),
            None => self
                .window
                .outer_position()
                .map(|p| (p.x, p.y))
                .unwrap_or((0, 0)),
        };

        let local = to_surface_local(active.rect, origin, (OFFSET_X, OFFSET_Y));
        tracing::trace!(
            title = %active.title,
            hwnd = active.hwnd,
            origin_x = origin.0,
            origin_y = origin.1,
            left = local.left,
            top = local.top,
            right = local.right,
            bottom = local.bottom,
            "Final local rect"
        );
        Ok(Some(local))
    }
}

/// Sends the visual state to the overlay webview
pub(crate) struct TauriMaskPresenter {
    app: AppHandle,
}

impl TauriMaskPresenter {
    pub(crate) fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl MaskPresenter for TauriMaskPresenter {
    fn present(&self, state: &OverlayVisualState) -> Result<()> {
        self.app
            .emit_to(labels::OVERLAY_LABEL, tracking::VISUAL_STATE_EVENT, *state)
            .context("Failed to emit overlay state")
    }
}

/// Spawn the hole-tracking loop for `window`. Only succeeds once.
pub(crate) fn start_overlay_loop(
    app: &AppHandle,
    window: &WebviewWindow,
    state: &AppState,
) -> Result<()> {
    let source = state
        .refresh_source
        .lock()
        .map_err(|_| anyhow!("Refresh source lock poisoned"))?
        .take()
        .context("Overlay loop already started")?;

    if let Err(e) = platform::foreground::install_foreground_hook(state.refresh.clone()) {
        tracing::warn!(error = %e, "Foreground hook unavailable, relying on polling");
    }

    let overlay = OverlayLoop::new(
        TauriScaleResolver::new(window.clone()),
        TauriActiveRegionProvider::new(window.clone()),
        TauriMaskPresenter::new(app.clone()),
    );
    tauri::async_runtime::spawn(overlay.run(source));
    Ok(())
}
