//! CPU rasterization of scene draw commands.
//!
//! A `Raster` is an RGBA8 row-major pixel buffer. Markers become filled
//! discs; triangle edges become discs stamped densely along each segment.
//! Geometry outside the buffer is clipped pixel by pixel, never an error.

use flowmesh_core::draw::DrawCommand;
use flowmesh_core::error::FlowError;
use flowmesh_core::scene::Scene;
use flowmesh_core::style::{Srgb, Style};
use glam::DVec2;

/// An RGBA8 pixel buffer with opaque alpha.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Creates a buffer filled with the background color.
    ///
    /// Returns `InvalidDimensions` if either dimension is zero or the
    /// pixel count overflows.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let pixels = width
            .checked_mul(height)
            .ok_or(FlowError::InvalidDimensions)?;
        let [r, g, b] = background.to_bytes();
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&[r, g, b, 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA8 data, row-major, alpha always 255.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Writes one pixel, silently clipping coordinates outside the buffer.
    fn set_pixel(&mut self, x: i64, y: i64, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.data[idx] = rgb[0];
        self.data[idx + 1] = rgb[1];
        self.data[idx + 2] = rgb[2];
    }

    /// Fills a disc: every pixel whose center lies within `radius` of
    /// `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Srgb) {
        let rgb = color.to_bytes();
        let r_sq = radius * radius;
        let x_min = (cx - radius).floor() as i64;
        let x_max = (cx + radius).ceil() as i64;
        let y_min = (cy - radius).floor() as i64;
        let y_max = (cy + radius).ceil() as i64;
        for py in y_min..=y_max {
            for px in x_min..=x_max {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(px, py, rgb);
                }
            }
        }
    }

    /// Strokes a segment by stamping discs of diameter `width` along it.
    pub fn stroke_line(&mut self, a: DVec2, b: DVec2, width: f64, color: Srgb) {
        let length = (b - a).length();
        // Two stamps per pixel of length keeps the stroke gap-free.
        let steps = (length * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = a.lerp(b, i as f64 / steps as f64);
            self.fill_circle(p.x, p.y, width / 2.0, color);
        }
    }

    /// Rasterizes a frame's draw commands in order.
    pub fn draw(&mut self, commands: &[DrawCommand], style: &Style) {
        for command in commands {
            match *command {
                DrawCommand::Triangle { corners } => {
                    let [a, b, c] = corners;
                    self.stroke_line(a, b, style.line_width, style.edge_color);
                    self.stroke_line(b, c, style.line_width, style.edge_color);
                    self.stroke_line(c, a, style.line_width, style.edge_color);
                }
                DrawCommand::Marker { position } => {
                    self.fill_circle(position.x, position.y, style.point_radius, style.point_color);
                }
            }
        }
    }
}

/// Renders a scene's current frame into a fresh buffer sized to its
/// viewport.
pub fn render_frame(scene: &Scene, style: &Style) -> Result<Raster, FlowError> {
    let mut raster = Raster::new(
        scene.width().ceil() as usize,
        scene.height().ceil() as usize,
        style.background,
    )?;
    raster.draw(&scene.draw_commands(), style);
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmesh_core::config::SceneConfig;

    fn pixel(raster: &Raster, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * raster.width() + x) * 4;
        raster.data()[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn new_raster_is_background_filled_with_opaque_alpha() {
        let bg = Srgb::from_hex("#102030").unwrap();
        let raster = Raster::new(8, 4, bg).unwrap();
        assert_eq!(raster.data().len(), 8 * 4 * 4);
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(pixel(&raster, x, y), [0x10, 0x20, 0x30, 255]);
            }
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let bg = Srgb::from_hex("#000000").unwrap();
        assert!(matches!(
            Raster::new(0, 4, bg).unwrap_err(),
            FlowError::InvalidDimensions
        ));
    }

    #[test]
    fn fill_circle_stamps_the_center_pixel() {
        let mut raster = Raster::new(16, 16, Srgb::from_hex("#000000").unwrap()).unwrap();
        raster.fill_circle(8.0, 8.0, 3.0, Srgb::from_hex("#ff0000").unwrap());
        assert_eq!(pixel(&raster, 8, 8)[0], 255);
        // A corner well outside the radius stays background.
        assert_eq!(pixel(&raster, 0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn geometry_outside_the_buffer_is_clipped() {
        let mut raster = Raster::new(16, 16, Srgb::from_hex("#000000").unwrap()).unwrap();
        raster.fill_circle(-100.0, -100.0, 5.0, Srgb::from_hex("#ff0000").unwrap());
        raster.stroke_line(
            DVec2::new(-50.0, 8.0),
            DVec2::new(60.0, 8.0),
            2.0,
            Srgb::from_hex("#00ff00").unwrap(),
        );
        // The line crosses the buffer, so in-bounds pixels on its path are
        // painted and nothing panicked on the way.
        assert_eq!(pixel(&raster, 8, 8)[1], 255);
    }

    #[test]
    fn stroke_line_leaves_no_gaps() {
        let mut raster = Raster::new(32, 8, Srgb::from_hex("#000000").unwrap()).unwrap();
        raster.stroke_line(
            DVec2::new(2.0, 4.0),
            DVec2::new(30.0, 4.0),
            2.0,
            Srgb::from_hex("#ffffff").unwrap(),
        );
        for x in 2..30 {
            assert_eq!(pixel(&raster, x, 4)[0], 255, "gap at x={x}");
        }
    }

    #[test]
    fn render_frame_matches_viewport_size() {
        let scene = Scene::from_config(&SceneConfig::new(120.0, 90.0, 42)).unwrap();
        let raster = render_frame(&scene, &Style::default()).unwrap();
        assert_eq!(raster.width(), 120);
        assert_eq!(raster.height(), 90);
    }

    #[test]
    fn render_frame_paints_markers_over_background() {
        let mut scene = Scene::from_config(&SceneConfig::new(120.0, 90.0, 42)).unwrap();
        scene.tick(0.0);
        let style = Style::default();
        let raster = render_frame(&scene, &style).unwrap();
        let [pr, pg, pb] = style.point_color.to_bytes();
        let found = scene.points().iter().any(|p| {
            let x = p.position().x.round() as usize;
            let y = p.position().y.round() as usize;
            x < raster.width()
                && y < raster.height()
                && pixel(&raster, x, y)[..3] == [pr, pg, pb]
        });
        assert!(found, "no marker pixel found at any point position");
    }
}
