//! Static mesh topology: anchors and the triangles that connect them.
//!
//! A mesh is built once and never mutated. It carries no behavior; the
//! per-point motion lives in [`crate::physics`], and a `Scene` materializes
//! one moving point per anchor.

use crate::error::FlowError;
use glam::DVec2;

/// Fixed anchors plus triangle index triples.
#[derive(Debug, Clone)]
pub struct Mesh {
    anchors: Vec<DVec2>,
    triangles: Vec<[usize; 3]>,
}

impl Mesh {
    /// Creates a mesh from anchors and triangle index triples.
    ///
    /// Returns `PointIndexOutOfBounds` if any triangle references a point
    /// the mesh does not have.
    pub fn new(anchors: Vec<DVec2>, triangles: Vec<[usize; 3]>) -> Result<Self, FlowError> {
        for (t, tri) in triangles.iter().enumerate() {
            for &index in tri {
                if index >= anchors.len() {
                    return Err(FlowError::PointIndexOutOfBounds {
                        triangle: t,
                        index,
                        points: anchors.len(),
                    });
                }
            }
        }
        Ok(Self { anchors, triangles })
    }

    /// A regular triangulated grid covering a `width` × `height` viewport.
    ///
    /// Anchors sit `spacing` apart; the last row and column are clamped to
    /// the far viewport edge so the mesh always reaches it. Each grid quad
    /// is split into two triangles.
    pub fn triangulated_grid(width: f64, height: f64, spacing: f64) -> Result<Self, FlowError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(FlowError::InvalidDimensions);
        }
        if !(spacing > 0.0) {
            return Err(FlowError::InvalidParam {
                name: "spacing",
                value: spacing,
                constraint: "must be strictly positive",
            });
        }

        let nx = (width / spacing).ceil() as usize + 1;
        let ny = (height / spacing).ceil() as usize + 1;

        let mut anchors = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            for ix in 0..nx {
                let x = (ix as f64 * spacing).min(width);
                let y = (iy as f64 * spacing).min(height);
                anchors.push(DVec2::new(x, y));
            }
        }

        let mut triangles = Vec::with_capacity((nx - 1) * (ny - 1) * 2);
        for iy in 0..ny - 1 {
            for ix in 0..nx - 1 {
                let a = iy * nx + ix;
                let b = a + 1;
                let c = a + nx;
                let d = c + 1;
                triangles.push([a, b, c]);
                triangles.push([b, d, c]);
            }
        }

        Self::new(anchors, triangles)
    }

    /// The fixed anchor positions.
    pub fn anchors(&self) -> &[DVec2] {
        &self.anchors
    }

    /// The triangle index triples.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Number of points in the mesh.
    pub fn point_count(&self) -> usize {
        self.anchors.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
