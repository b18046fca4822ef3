//! Host seams of the overlay core
//!
//! The tracking loop only talks to the host through these traits, so the
//! geometry, renderer and loop can be exercised without a live display.

use crate::geometry::PhysicalRect;
use crate::render::OverlayVisualState;

/// Reports the overlay window's current display metrics
pub trait ScaleResolver: Send + Sync {
    /// Physical-to-logical pixel ratio of the monitor the overlay is on.
    /// Must be queried every cycle; it changes when the overlay moves monitors.
    fn scale_factor(&self) -> anyhow::Result<f64>;

    /// Inner size of the overlay window in physical pixels (width, height)
    fn physical_size(&self) -> anyhow::Result<(u32, u32)>;
}

/// Source of the active window rectangle
pub trait ActiveRegionProvider: Send + Sync {
    /// Active window rectangle in overlay-local physical pixels, or `None`
    /// when no qualifying window is active (e.g. desktop focus).
    fn active_region(&self) -> anyhow::Result<Option<PhysicalRect>>;
}

/// Delivers a visual state to the surface that draws it
pub trait MaskPresenter: Send + Sync {
    fn present(&self, state: &OverlayVisualState) -> anyhow::Result<()>;
}

/// Provider for hosts without foreground window tracking; the overlay stays hidden
#[derive(Debug, Default, Clone, Copy)]
pub struct NoActiveRegion;

impl ActiveRegionProvider for NoActiveRegion {
    fn active_region(&self) -> anyhow::Result<Option<PhysicalRect>> {
        Ok(None)
    }
}

impl<T: ScaleResolver + ?Sized> ScaleResolver for std::sync::Arc<T> {
    fn scale_factor(&self) -> anyhow::Result<f64> {
        (**self).scale_factor()
    }

    fn physical_size(&self) -> anyhow::Result<(u32, u32)> {
        (**self).physical_size()
    }
}

impl<T: ActiveRegionProvider + ?Sized> ActiveRegionProvider for std::sync::Arc<T> {
    fn active_region(&self) -> anyhow::Result<Option<PhysicalRect>> {
        (**self).active_region()
    }
}

impl<T: MaskPresenter + ?Sized> MaskPresenter for std::sync::Arc<T> {
    fn present(&self, state: &OverlayVisualState) -> anyhow::Result<()> {
        (**self).present(state)
    }
}
