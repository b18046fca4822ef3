//! Hamaguri - Active Window Spotlight Core
//!
//! This library tracks the active window and computes the masks that punch a
//! hole into the full-screen overlay. It has no dependency on the UI host.

// Configuration constants
pub mod config;

// Runtime settings (environment driven)
pub mod settings;

// Hole calculator and mask renderer
pub mod geometry;
pub mod render;

// Host seams and scale resolution
pub mod traits;
pub mod scale;

// Loop driver and its refresh scheduling
pub mod overlay_loop;
pub mod refresh;

// Window role detection
pub mod surface;

// Active window filtering, window events and coordinate helpers
pub mod coords;
pub mod win_events;
pub mod window_filter;

// Re-export commonly used types
pub use geometry::{compute_geometry, HoleGeometry, LogicalRect, MaskSet, PhysicalRect, ScaleFactor, Viewport};
pub use overlay_loop::{CycleOutcome, OverlayLoop};
pub use refresh::{refresh_channel, RefreshHandle, RefreshMode, RefreshReason};
pub use render::{apply_geometry, OverlayVisualState};
pub use surface::{SurfaceLayout, SurfaceRegistry, SurfaceRole};
pub use traits::{ActiveRegionProvider, MaskPresenter, ScaleResolver};
