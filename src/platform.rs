//! Platform Abstraction Layer
//!
//! Native window tweaks the webview host does not expose, behind cfg attributes.

pub mod foreground;

/// Platform-specific window utilities
pub mod window {
    /// Add WS_EX_TRANSPARENT | WS_EX_LAYERED so mouse input passes through
    #[cfg(windows)]
    pub fn set_click_through(hwnd_value: isize) {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::WindowsAndMessaging::{
            GetWindowLongW, SetWindowLongW, GWL_EXSTYLE, WS_EX_LAYERED, WS_EX_TRANSPARENT,
        };

        unsafe {
            let hwnd = HWND(hwnd_value as *mut std::ffi::c_void);
            let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE);
            SetWindowLongW(
                hwnd,
                GWL_EXSTYLE,
                ex_style | (WS_EX_TRANSPARENT.0 | WS_EX_LAYERED.0) as i32,
            );
        }
    }

    #[cfg(not(windows))]
    pub fn set_click_through(_hwnd_value: isize) {}

    /// Show a window without taking focus from the active window
    #[cfg(windows)]
    pub fn show_no_activate(hwnd_value: isize) -> anyhow::Result<()> {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_SHOWNOACTIVATE};

        unsafe {
            let hwnd = HWND(hwnd_value as *mut std::ffi::c_void);
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        }
        Ok(())
    }

    #[cfg(not(windows))]
    pub fn show_no_activate(_hwnd_value: isize) -> anyhow::Result<()> {
        anyhow::bail!("show without activation is not supported on this platform")
    }
}
