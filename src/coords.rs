//! Screen to overlay-local coordinate helpers (physical pixels)

use serde::{Deserialize, Serialize};

use crate::geometry::PhysicalRect;

/// Physical bounds of a monitor in virtual-screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorBounds {
    pub fn origin(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

/// Grow `rect` by `px` on every side
pub fn inflate(rect: PhysicalRect, px: i32) -> PhysicalRect {
    PhysicalRect::new(rect.left - px, rect.top - px, rect.right + px, rect.bottom + px)
}

/// Shift `rect` by `(dx, dy)`
pub fn offset(rect: PhysicalRect, dx: i32, dy: i32) -> PhysicalRect {
    PhysicalRect::new(rect.left + dx, rect.top + dy, rect.right + dx, rect.bottom + dy)
}

/// Translate a screen rectangle into the overlay's local space.
///
/// `origin` is the top-left of the monitor the overlay is expected to cover
/// (or the overlay's own position when no monitor is known); `correction`
/// is added afterwards.
pub fn to_surface_local(
    rect: PhysicalRect,
    origin: (i32, i32),
    correction: (i32, i32),
) -> PhysicalRect {
    let local = offset(rect, -origin.0, -origin.1);
    offset(local, correction.0, correction.1)
}

/// Whether the overlay at `position`/`size` must be moved onto `monitor`
pub fn needs_resync(position: (i32, i32), size: (u32, u32), monitor: &MonitorBounds) -> bool {
    position != monitor.origin() || size != (monitor.width, monitor.height)
}
