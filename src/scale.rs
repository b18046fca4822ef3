//! Scale resolution for the overlay surface

use anyhow::{Context, Result};

use crate::geometry::{ScaleFactor, Viewport};
use crate::traits::ScaleResolver;

/// Current scale factor and logical size of the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub scale: ScaleFactor,
    pub viewport: Viewport,
}

/// Query `resolver` and validate the result.
///
/// Called once per refresh cycle; nothing is cached between calls.
pub fn resolve_surface<R: ScaleResolver + ?Sized>(resolver: &R) -> Result<SurfaceMetrics> {
    let raw = resolver
        .scale_factor()
        .context("Failed to query overlay scale factor")?;
    let scale = ScaleFactor::new(raw)?;
    let (width, height) = resolver
        .physical_size()
        .context("Failed to query overlay size")?;

    Ok(SurfaceMetrics {
        scale,
        viewport: Viewport::from_physical(width, height, scale),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64, (u32, u32));

    impl ScaleResolver for Fixed {
        fn scale_factor(&self) -> Result<f64> {
            Ok(self.0)
        }

        fn physical_size(&self) -> Result<(u32, u32)> {
            Ok(self.1)
        }
    }

    struct Broken;

    impl ScaleResolver for Broken {
        fn scale_factor(&self) -> Result<f64> {
            anyhow::bail!("window closed")
        }

        fn physical_size(&self) -> Result<(u32, u32)> {
            Ok((0, 0))
        }
    }

    #[test]
    fn test_resolves_logical_viewport() {
        let metrics = resolve_surface(&Fixed(1.25, (2400, 1350))).unwrap();
        assert_eq!(metrics.scale.get(), 1.25);
        assert_eq!(metrics.viewport, Viewport::new(1920, 1080));
    }

    #[test]
    fn test_rejects_zero_scale() {
        assert!(resolve_surface(&Fixed(0.0, (100, 100))).is_err());
    }

    #[test]
    fn test_error_carries_context() {
        let err = resolve_surface(&Broken).unwrap_err();
        assert!(format!("{:#}", err).contains("window closed"));
    }
}
