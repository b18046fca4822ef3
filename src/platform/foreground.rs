//! Foreground window lookup
//!
//! Walks down the z-order from the foreground window and returns the first
//! window that qualifies as "active" for the spotlight, with its visible frame
//! in screen coordinates (physical pixels).

use hamaguri_overlay::geometry::PhysicalRect;

/// The window the hole is placed over
#[derive(Debug, Clone)]
pub struct ForegroundWindow {
    pub hwnd: isize,
    pub title: String,
    /// Visible frame in screen coordinates, already inflated
    pub rect: PhysicalRect,
}

#[cfg(target_os = "windows")]
pub use windows_impl::{find_active_window, install_foreground_hook};

#[cfg(not(target_os = "windows"))]
pub use fallback::{find_active_window, install_foreground_hook};

#[cfg(target_os = "windows")]
mod windows_impl {
    use super::ForegroundWindow;
    use hamaguri_overlay::config::frame::FRAME_INFLATE_PX;
    use hamaguri_overlay::coords::inflate;
    use hamaguri_overlay::geometry::PhysicalRect;
    use hamaguri_overlay::refresh::RefreshHandle;
    use hamaguri_overlay::win_events::{nudge_for, HOOKED_RANGES};
    use hamaguri_overlay::window_filter::{first_qualifying, WindowCandidate};
    use lazy_static::lazy_static;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use windows::Win32::Foundation::{HWND, RECT};
    use windows::Win32::Graphics::Dwm::{DwmGetWindowAttribute, DWMWA_EXTENDED_FRAME_BOUNDS};
    use windows::Win32::UI::Accessibility::{SetWinEventHook, UnhookWinEvent, HWINEVENTHOOK};
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetClassNameW, GetForegroundWindow, GetMessageW, GetWindow,
        GetWindowRect, GetWindowTextW, IsWindowVisible, TranslateMessage, GW_HWNDNEXT, MSG,
        WINEVENT_OUTOFCONTEXT,
    };

    lazy_static! {
        // Hook callbacks are plain functions, so the nudge target lives here
        static ref FOREGROUND_NUDGE: Mutex<Option<RefreshHandle>> = Mutex::new(None);
    }

    static FOREGROUND_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    fn read_utf16(read: impl FnOnce(&mut [u16]) -> i32) -> String {
        let mut buffer: [u16; 512] = [0; 512];
        let len = read(&mut buffer).max(0) as usize;
        String::from_utf16_lossy(&buffer[..len.min(buffer.len())])
    }

    fn candidate(hwnd: HWND, exclude_hwnd: Option<isize>) -> WindowCandidate {
        unsafe {
            let title = read_utf16(|buf| GetWindowTextW(hwnd, buf));
            let class_name = read_utf16(|buf| GetClassNameW(hwnd, buf));
            let visible = IsWindowVisible(hwnd).as_bool();

            let candidate = WindowCandidate::new(&title, &class_name, visible);
            if exclude_hwnd == Some(hwnd.0 as isize) {
                candidate.own()
            } else {
                candidate
            }
        }
    }

    /// Visible frame bounds from DWM, falling back to the full window rect
    fn frame_bounds(hwnd: HWND) -> Option<RECT> {
        unsafe {
            let mut rect = RECT::default();
            let dwm = DwmGetWindowAttribute(
                hwnd,
                DWMWA_EXTENDED_FRAME_BOUNDS,
                &mut rect as *mut _ as *mut _,
                std::mem::size_of::<RECT>() as u32,
            );

            let mut win_rect = RECT::default();
            let win = GetWindowRect(hwnd, &mut win_rect);

            tracing::trace!(
                dwm_left = rect.left,
                dwm_top = rect.top,
                dwm_right = rect.right,
                dwm_bottom = rect.bottom,
                offset_left = rect.left - win_rect.left,
                offset_top = rect.top - win_rect.top,
                offset_right = rect.right - win_rect.right,
                offset_bottom = rect.bottom - win_rect.bottom,
                "Frame bounds comparison (DWM vs Win32)"
            );

            match (dwm, win) {
                (Ok(()), _) => Some(rect),
                (Err(e), Ok(())) => {
                    tracing::debug!(error = %e, "DWM frame bounds unavailable, using window rect");
                    Some(win_rect)
                }
                (Err(e), Err(_)) => {
                    tracing::debug!(error = %e, "Failed to read window bounds");
                    None
                }
            }
        }
    }

    /// First qualifying window at or below the foreground window.
    ///
    /// `exclude_hwnd` is the overlay, which is skipped when it sits on top.
    pub fn find_active_window(exclude_hwnd: Option<isize>) -> anyhow::Result<Option<ForegroundWindow>> {
        unsafe {
            let foreground = GetForegroundWindow();
            if foreground.is_invalid() {
                tracing::trace!("GetForegroundWindow returned invalid HWND");
                return Ok(None);
            }

            let z_order = std::iter::successors(Some(foreground), |&hwnd| {
                GetWindow(hwnd, GW_HWNDNEXT)
                    .ok()
                    .filter(|next| !next.is_invalid())
            })
            .map(|hwnd| (hwnd.0 as isize, candidate(hwnd, exclude_hwnd)));

            let Some((raw_hwnd, target)) = first_qualifying(z_order) else {
                tracing::trace!("No suitable window found below the foreground window");
                return Ok(None);
            };
            let hwnd = HWND(raw_hwnd as *mut std::ffi::c_void);
            let title = target.title;

            let Some(bounds) = frame_bounds(hwnd) else {
                return Ok(None);
            };

            let rect = inflate(
                PhysicalRect::new(bounds.left, bounds.top, bounds.right, bounds.bottom),
                FRAME_INFLATE_PX,
            );

            Ok(Some(ForegroundWindow {
                hwnd: hwnd.0 as isize,
                title,
                rect,
            }))
        }
    }

    unsafe extern "system" fn window_event_proc(
        _hook: HWINEVENTHOOK,
        event: u32,
        hwnd: HWND,
        id_object: i32,
        _id_child: i32,
        _event_thread: u32,
        _event_time: u32,
    ) {
        let is_foreground = !hwnd.is_invalid() && hwnd == GetForegroundWindow();
        let Some(reason) = nudge_for(event, id_object, is_foreground) else {
            return;
        };
        if let Ok(nudge) = FOREGROUND_NUDGE.lock() {
            if let Some(handle) = nudge.as_ref() {
                handle.request(reason);
            }
        }
    }

    /// Nudge `handle` whenever the foreground window changes, moves, resizes
    /// or is minimized/restored.
    ///
    /// Runs a dedicated thread with its own message loop; out-of-context
    /// WinEvent hooks are delivered through it.
    pub fn install_foreground_hook(handle: RefreshHandle) -> anyhow::Result<()> {
        if let Ok(mut nudge) = FOREGROUND_NUDGE.lock() {
            *nudge = Some(handle);
        }

        if FOREGROUND_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        std::thread::Builder::new()
            .name("foreground-hook".into())
            .spawn(|| unsafe {
                let hooks: Vec<HWINEVENTHOOK> = HOOKED_RANGES
                    .iter()
                    .filter_map(|&(min, max)| {
                        let hook = SetWinEventHook(
                            min,
                            max,
                            None,
                            Some(window_event_proc),
                            0,
                            0,
                            WINEVENT_OUTOFCONTEXT,
                        );
                        if hook.is_invalid() {
                            tracing::error!(min, max, "Failed to install window event hook");
                            None
                        } else {
                            Some(hook)
                        }
                    })
                    .collect();

                if hooks.is_empty() {
                    FOREGROUND_HOOK_INSTALLED.store(false, Ordering::SeqCst);
                    return;
                }

                tracing::info!(hooks = hooks.len(), "Window event hooks installed, starting message loop");
                let mut msg: MSG = std::mem::zeroed();
                // -1 signals an error; 0 is WM_QUIT
                while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }

                for hook in hooks {
                    let _ = UnhookWinEvent(hook);
                }
                FOREGROUND_HOOK_INSTALLED.store(false, Ordering::SeqCst);
                tracing::info!("Window event hooks uninstalled");
            })?;

        Ok(())
    }
}

#[cfg(not(target_os = "windows"))]
mod fallback {
    use super::ForegroundWindow;
    use hamaguri_overlay::refresh::RefreshHandle;
    use std::sync::Once;

    static WARN_ONCE: Once = Once::new();

    /// No foreground tracking on this platform; the overlay stays hidden
    pub fn find_active_window(_exclude_hwnd: Option<isize>) -> anyhow::Result<Option<ForegroundWindow>> {
        WARN_ONCE.call_once(|| {
            tracing::warn!(
                platform = std::env::consts::OS,
                "Active window tracking is not supported on this platform"
            );
        });
        Ok(None)
    }

    pub fn install_foreground_hook(_handle: RefreshHandle) -> anyhow::Result<()> {
        Ok(())
    }
}
