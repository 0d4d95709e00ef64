//! PNG snapshots of rasterized frames.
//!
//! Feature-gated behind `png` (default on) so the rasterizer stays usable
//! without pulling in the `image` crate.

use crate::raster::{render_frame, Raster};
use flowmesh_core::error::FlowError;
use flowmesh_core::scene::Scene;
use flowmesh_core::style::Style;
use std::path::Path;

/// Writes a raster as a PNG image.
///
/// Returns `FlowError::InvalidDimensions` if the buffer dimensions
/// overflow `u32`, or `FlowError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FlowError> {
    let w = u32::try_from(raster.width()).map_err(|_| FlowError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FlowError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.data().to_vec())
        .ok_or_else(|| FlowError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FlowError::Io(e.to_string()))
}

/// Renders a scene's current frame and writes it as a PNG.
pub fn render_png(scene: &Scene, style: &Style, path: &Path) -> Result<(), FlowError> {
    write_png(&render_frame(scene, style)?, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmesh_core::config::SceneConfig;

    #[test]
    fn write_png_round_trip() {
        let mut scene = Scene::from_config(&SceneConfig::new(64.0, 48.0, 42)).unwrap();
        scene.tick(0.0);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        render_png(&scene, &Style::default(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 48);
    }

    #[test]
    fn write_png_to_bad_path_reports_io_error() {
        let scene = Scene::from_config(&SceneConfig::new(64.0, 48.0, 42)).unwrap();
        let err = render_png(
            &scene,
            &Style::default(),
            Path::new("/nonexistent-dir/frame.png"),
        )
        .unwrap_err();
        assert!(matches!(err, FlowError::Io(_)));
    }
}
