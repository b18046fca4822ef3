//! Surface role detection
//!
//! Both windows load the same page and run the same startup routine. The
//! window label decides which UI is shown and whether the hole-tracking loop
//! starts. The decision is made once per window; later calls get the same
//! answer back.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::config::window::OVERLAY_LABEL;
use crate::scale::resolve_surface;
use crate::traits::ScaleResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceRole {
    Overlay,
    Settings,
}

impl SurfaceRole {
    /// `"overlay"` is the overlay; every other label is a settings surface
    pub fn from_label(label: &str) -> Self {
        if label == OVERLAY_LABEL {
            SurfaceRole::Overlay
        } else {
            SurfaceRole::Settings
        }
    }
}

/// What the page should display, returned to the webview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceLayout {
    pub role: SurfaceRole,
    pub show_settings: bool,
    pub show_overlay: bool,
    pub tracking: bool,
}

impl SurfaceLayout {
    pub fn settings() -> Self {
        Self {
            role: SurfaceRole::Settings,
            show_settings: true,
            show_overlay: false,
            tracking: false,
        }
    }

    pub fn overlay() -> Self {
        Self {
            role: SurfaceRole::Overlay,
            show_settings: false,
            show_overlay: true,
            tracking: true,
        }
    }

    /// Overlay that failed to start: nothing drawn, no loop
    pub fn overlay_fallback() -> Self {
        Self {
            role: SurfaceRole::Overlay,
            show_settings: false,
            show_overlay: false,
            tracking: false,
        }
    }
}

/// Remembers the layout decided for each window label
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    decided: Mutex<HashMap<String, SurfaceLayout>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout_for(&self, label: &str) -> Option<SurfaceLayout> {
        self.decided
            .lock()
            .ok()
            .and_then(|decided| decided.get(label).copied())
    }

    /// Run the startup routine for `label` once.
    ///
    /// For the overlay the scale factor is checked first; `start_loop` is only
    /// invoked when that succeeds. Repeated calls for the same label return the
    /// first layout without running anything.
    pub fn initialize<R, F>(&self, label: &str, scale: &R, start_loop: F) -> SurfaceLayout
    where
        R: ScaleResolver + ?Sized,
        F: FnOnce() -> anyhow::Result<()>,
    {
        let mut decided = match self.decided.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(layout) = decided.get(label) {
            tracing::debug!(label, ?layout, "Surface already initialized");
            return *layout;
        }

        let role = SurfaceRole::from_label(label);
        let layout = match role {
            SurfaceRole::Settings => SurfaceLayout::settings(),
            SurfaceRole::Overlay => match resolve_surface(scale).and_then(|metrics| {
                tracing::info!(
                    label,
                    scale = metrics.scale.get(),
                    width = metrics.viewport.width,
                    height = metrics.viewport.height,
                    "Init - overlay surface"
                );
                start_loop()
            }) {
                Ok(()) => SurfaceLayout::overlay(),
                Err(e) => {
                    tracing::error!(label, error = %format!("{:#}", e), "Init failed");
                    SurfaceLayout::overlay_fallback()
                }
            },
        };

        tracing::info!(label, ?role, tracking = layout.tracking, "Surface initialized");
        decided.insert(label.to_string(), layout);
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f64);

    impl ScaleResolver for Scale {
        fn scale_factor(&self) -> anyhow::Result<f64> {
            Ok(self.0)
        }

        fn physical_size(&self) -> anyhow::Result<(u32, u32)> {
            Ok((800, 600))
        }
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(SurfaceRole::from_label("overlay"), SurfaceRole::Overlay);
        assert_eq!(SurfaceRole::from_label("main"), SurfaceRole::Settings);
        assert_eq!(SurfaceRole::from_label("Overlay"), SurfaceRole::Settings);
        assert_eq!(SurfaceRole::from_label(""), SurfaceRole::Settings);
    }

    #[test]
    fn test_layout_serializes_camel_case() {
        let json = serde_json::to_value(SurfaceLayout::overlay()).unwrap();
        assert_eq!(json["role"], "overlay");
        assert_eq!(json["showSettings"], false);
        assert_eq!(json["showOverlay"], true);
    }

    #[test]
    fn test_start_failure_falls_back() {
        let registry = SurfaceRegistry::new();
        let layout = registry.initialize("overlay", &Scale(1.0), || {
            anyhow::bail!("runtime unavailable")
        });
        assert_eq!(layout, SurfaceLayout::overlay_fallback());
        assert_eq!(registry.layout_for("overlay"), Some(layout));
    }
}
