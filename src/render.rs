//! Mask renderer
//!
//! The overlay's five visual regions (four masks and the hole outline) are
//! modeled as an explicit [`OverlayVisualState`] value. [`apply_geometry`]
//! writes a cycle's geometry into it; a [`MaskPresenter`] pushes the result to
//! whatever actually draws it (the overlay webview in the app).
//!
//! [`MaskPresenter`]: crate::traits::MaskPresenter

use serde::Serialize;

use crate::geometry::{HoleGeometry, MaskRect};

/// Display attributes of one region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegionState {
    pub visible: bool,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl RegionState {
    fn show(&mut self, rect: MaskRect) {
        *self = Self {
            visible: true,
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
        };
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    pub fn rect(&self) -> MaskRect {
        MaskRect::new(self.left, self.top, self.width, self.height)
    }
}

/// Identifies a region of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionId {
    MaskTop,
    MaskBottom,
    MaskLeft,
    MaskRight,
    Hole,
}

impl RegionId {
    pub const ALL: [RegionId; 5] = [
        RegionId::MaskTop,
        RegionId::MaskBottom,
        RegionId::MaskLeft,
        RegionId::MaskRight,
        RegionId::Hole,
    ];
}

/// Display state of all five overlay regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayVisualState {
    pub mask_top: RegionState,
    pub mask_bottom: RegionState,
    pub mask_left: RegionState,
    pub mask_right: RegionState,
    pub hole: RegionState,
}

impl OverlayVisualState {
    pub fn region(&self, id: RegionId) -> &RegionState {
        match id {
            RegionId::MaskTop => &self.mask_top,
            RegionId::MaskBottom => &self.mask_bottom,
            RegionId::MaskLeft => &self.mask_left,
            RegionId::MaskRight => &self.mask_right,
            RegionId::Hole => &self.hole,
        }
    }

    fn region_mut(&mut self, id: RegionId) -> &mut RegionState {
        match id {
            RegionId::MaskTop => &mut self.mask_top,
            RegionId::MaskBottom => &mut self.mask_bottom,
            RegionId::MaskLeft => &mut self.mask_left,
            RegionId::MaskRight => &mut self.mask_right,
            RegionId::Hole => &mut self.hole,
        }
    }

    pub fn all_hidden(&self) -> bool {
        RegionId::ALL.iter().all(|id| !self.region(*id).visible)
    }

    pub fn all_visible(&self) -> bool {
        RegionId::ALL.iter().all(|id| self.region(*id).visible)
    }
}

/// Write one cycle's geometry into `state`.
///
/// `None` hides every region and leaves their last geometry untouched.
pub fn apply_geometry(state: &mut OverlayVisualState, geometry: Option<&HoleGeometry>) {
    let Some(geometry) = geometry else {
        for id in RegionId::ALL {
            state.region_mut(id).hide();
        }
        return;
    };

    let masks = &geometry.masks;
    state.mask_top.show(masks.top);
    state.mask_bottom.show(masks.bottom);
    state.mask_left.show(masks.left);
    state.mask_right.show(masks.right);
    state.hole.show(geometry.hole.into());

    let hole = geometry.hole;
    tracing::debug!(
        left = hole.left,
        top = hole.top,
        width = hole.width,
        height = hole.height,
        "Mask update: {},{} {}x{}",
        hole.left,
        hole.top,
        hole.width,
        hole.height
    );
}
