//! Hole geometry
//!
//! Converts the active window rectangle (physical pixels, overlay-local) into
//! the logical-space hole and the four masks that cover everything around it.
//!
//! Rounding is applied to left/top/width/height only. Right and bottom are
//! always derived from them so adjacent masks share exact edges.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Rectangle in physical pixels as reported by the active-region provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PhysicalRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Physical-to-logical pixel ratio of the overlay's current display.
///
/// Always finite and strictly positive; a zero or negative factor is a host
/// misconfiguration and is rejected here instead of inside the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> Result<Self> {
        ensure!(
            value.is_finite() && value > 0.0,
            "Invalid scale factor: {} (must be finite and > 0)",
            value
        );
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Physical length to logical pixels, rounded half up
    pub fn to_logical(self, physical: i32) -> i32 {
        round_half_up(physical as f64 / self.0)
    }
}

/// Logical size of the overlay surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn from_physical(width: u32, height: u32, scale: ScaleFactor) -> Self {
        Self {
            width: round_half_up(width as f64 / scale.get()),
            height: round_half_up(height as f64 / scale.get()),
        }
    }
}

/// Hole rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl LogicalRect {
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// True when width or height collapsed to zero or below
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// One axis-aligned mask rectangle in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl MaskRect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

impl From<LogicalRect> for MaskRect {
    fn from(rect: LogicalRect) -> Self {
        Self::new(rect.left, rect.top, rect.width, rect.height)
    }
}

/// The four rectangles covering the viewport outside the hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaskSet {
    pub top: MaskRect,
    pub bottom: MaskRect,
    pub left: MaskRect,
    pub right: MaskRect,
}

impl MaskSet {
    /// Derive the masks for `hole` inside `viewport`.
    ///
    /// Top and bottom span the full width, left and right span the hole's
    /// height. Mask extents are clamped into `0..=viewport`; the hole itself
    /// is never adjusted.
    pub fn around(hole: &LogicalRect, viewport: Viewport) -> Self {
        let (right, bottom) = (hole.right(), hole.bottom());
        let clamp_w = |v: i32| v.clamp(0, viewport.width.max(0));
        let clamp_h = |v: i32| v.clamp(0, viewport.height.max(0));
        Self {
            top: MaskRect::new(0, 0, viewport.width, clamp_h(hole.top)),
            bottom: MaskRect::new(0, bottom, viewport.width, clamp_h(viewport.height - bottom)),
            left: MaskRect::new(0, hole.top, clamp_w(hole.left), hole.height.max(0)),
            right: MaskRect::new(right, hole.top, clamp_w(viewport.width - right), hole.height.max(0)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaskRect> {
        [&self.top, &self.bottom, &self.left, &self.right].into_iter()
    }
}

/// Hole plus masks for one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HoleGeometry {
    pub hole: LogicalRect,
    pub masks: MaskSet,
}

/// Round half toward positive infinity (`-2.5 -> -2`, `2.5 -> 3`)
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Convert a physical rectangle into logical space.
///
/// Each of left/top/width/height is rounded independently; a zero or
/// negative size is kept as-is.
pub fn to_logical(rect: &PhysicalRect, scale: ScaleFactor) -> LogicalRect {
    LogicalRect {
        left: scale.to_logical(rect.left),
        top: scale.to_logical(rect.top),
        width: scale.to_logical(rect.width()),
        height: scale.to_logical(rect.height()),
    }
}

/// Hole calculator: `None` in, `None` out ("hide everything")
pub fn compute_geometry(
    rect: Option<&PhysicalRect>,
    scale: ScaleFactor,
    viewport: Viewport,
) -> Option<HoleGeometry> {
    let hole = to_logical(rect?, scale);
    Some(HoleGeometry {
        hole,
        masks: MaskSet::around(&hole, viewport),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(value: f64) -> ScaleFactor {
        ScaleFactor::new(value).unwrap()
    }

    #[test]
    fn test_scale_factor_rejects_non_positive() {
        assert!(ScaleFactor::new(0.0).is_err());
        assert!(ScaleFactor::new(-1.25).is_err());
        assert!(ScaleFactor::new(f64::NAN).is_err());
        assert!(ScaleFactor::new(f64::INFINITY).is_err());
        assert_eq!(scale(1.5).get(), 1.5);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_right_bottom_are_derived_not_rounded() {
        // left 101/2 = 50.5 -> 51, width 201/2 = 100.5 -> 101
        // right 302/2 = 151 on its own would be 151, derived right is 152
        let rect = PhysicalRect::new(101, 0, 302, 10);
        let logical = to_logical(&rect, scale(2.0));
        assert_eq!(logical.left, 51);
        assert_eq!(logical.width, 101);
        assert_eq!(logical.right(), 152);
    }

    #[test]
    fn test_negative_size_kept() {
        let rect = PhysicalRect::new(40, 40, 20, 10);
        let logical = to_logical(&rect, scale(1.0));
        assert_eq!(logical.width, -20);
        assert_eq!(logical.height, -30);
        assert!(logical.is_degenerate());
    }

    #[test]
    fn test_masks_clamp_when_hole_leaves_viewport() {
        let hole = LogicalRect {
            left: -10,
            top: -5,
            width: 50,
            height: 30,
        };
        let masks = MaskSet::around(&hole, Viewport::new(30, 20));
        assert_eq!(masks.top.height, 0);
        assert_eq!(masks.left.width, 0);
        assert_eq!(masks.right.width, 0);
        assert_eq!(masks.bottom.height, 0);
    }

    #[test]
    fn test_masks_never_exceed_viewport() {
        let viewport = Viewport::new(30, 20);
        let below_right = LogicalRect {
            left: 45,
            top: 35,
            width: 10,
            height: 10,
        };
        let masks = MaskSet::around(&below_right, viewport);
        assert_eq!(masks.top.height, 20);
        assert_eq!(masks.left.width, 30);
        assert_eq!(masks.bottom.height, 0);
        assert_eq!(masks.right.width, 0);

        let above_left = LogicalRect {
            left: -40,
            top: -30,
            width: 10,
            height: 10,
        };
        let masks = MaskSet::around(&above_left, viewport);
        assert_eq!(masks.bottom.height, 20);
        assert_eq!(masks.right.width, 30);
    }

    #[test]
    fn test_none_propagates() {
        assert!(compute_geometry(None, scale(1.0), Viewport::new(100, 100)).is_none());
    }

    #[test]
    fn test_viewport_from_physical() {
        let viewport = Viewport::from_physical(2880, 1620, scale(1.5));
        assert_eq!(viewport, Viewport::new(1920, 1080));
    }
}
