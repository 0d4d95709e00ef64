//! The simulation context and per-tick driver.
//!
//! A `Scene` owns everything one animation instance needs (noise field,
//! points, topology, parameters) and is threaded explicitly through update
//! and render calls. Nothing is ambient, so multiple independent scenes
//! can coexist and tests are deterministic.
//!
//! The host scheduling primitive calls [`Scene::tick`] once per frame with
//! a monotonic millisecond timestamp; there is no internal loop and no
//! terminal state. Pointer events arrive between ticks on the same thread
//! (single-threaded cooperative hosts never preempt a tick in progress). A
//! port to a preemptive multi-threaded host must serialize pointer updates
//! through a queue drained at tick start, preserving the single-writer
//! assumption the integrator makes.

use crate::config::{FlowParams, SceneConfig};
use crate::draw::DrawCommand;
use crate::error::FlowError;
use crate::mesh::Mesh;
use crate::noise::NoiseField;
use crate::physics::Point;
use glam::DVec2;

/// One running mesh animation.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    params: FlowParams,
    noise: NoiseField,
    points: Vec<Point>,
    triangles: Vec<[usize; 3]>,
    last_timestamp: Option<f64>,
}

impl Scene {
    /// Builds a scene from a mesh and validated inputs.
    ///
    /// Every anchor must lie inside the viewport: the noise lattice only
    /// covers that area, and checking here keeps the tick path free of
    /// fallible lookups. Points and triangles keep stable identities for
    /// the life of the scene.
    pub fn new(
        mesh: Mesh,
        width: f64,
        height: f64,
        seed: u64,
        params: FlowParams,
    ) -> Result<Self, FlowError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(FlowError::InvalidDimensions);
        }
        params.validate()?;
        for (index, anchor) in mesh.anchors().iter().enumerate() {
            let inside = anchor.x >= 0.0
                && anchor.x <= width
                && anchor.y >= 0.0
                && anchor.y <= height;
            if !inside {
                return Err(FlowError::AnchorOutOfBounds {
                    index,
                    x: anchor.x,
                    y: anchor.y,
                    width,
                    height,
                });
            }
        }

        let noise = NoiseField::new(width, height, params.grid_size, params.time_scale, seed)?;
        let points = mesh.anchors().iter().copied().map(Point::new).collect();
        let triangles = mesh.triangles().to_vec();

        Ok(Self {
            width,
            height,
            params,
            noise,
            points,
            triangles,
            last_timestamp: None,
        })
    }

    /// Builds a scene from a serializable description.
    pub fn from_config(config: &SceneConfig) -> Result<Self, FlowError> {
        config.validate()?;
        Self::new(
            config.build_mesh()?,
            config.width,
            config.height,
            config.seed,
            config.flow_params(),
        )
    }

    /// Advances the animation to a host-supplied timestamp (milliseconds,
    /// monotonic).
    ///
    /// Slides the noise window forward until it covers the timestamp,
    /// updates every point's forces and position (`dt` is the time since
    /// the previous tick, 0 on the first), and leaves the scene ready for
    /// [`Scene::draw_commands`]. Never fails: every fault was ruled out at
    /// construction.
    pub fn tick(&mut self, timestamp: f64) {
        while timestamp > self.noise.end_time() {
            self.noise.advance_window();
        }

        let dt = self.last_timestamp.map_or(0.0, |prev| timestamp - prev);
        let params = self.params;
        for point in self.points.iter_mut() {
            point.update_force(&self.noise, timestamp, &params);
            point.update_position(dt, &params);
        }
        self.last_timestamp = Some(timestamp);
    }

    /// Reacts to a pointer-position event in viewport coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let pointer = DVec2::new(x, y);
        let params = self.params;
        for point in self.points.iter_mut() {
            point.apply_pointer(pointer, &params);
        }
    }

    /// Reacts to the pointer leaving the surface.
    pub fn pointer_left(&mut self) {
        for point in self.points.iter_mut() {
            point.clear_pointer();
        }
    }

    /// The current frame as draw primitives: every triangle as a closed
    /// path through its corners' current positions, then every point as a
    /// marker.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.triangles.len() + self.points.len());
        for tri in &self.triangles {
            commands.push(DrawCommand::Triangle {
                corners: [
                    self.points[tri[0]].position(),
                    self.points[tri[1]].position(),
                    self.points[tri[2]].position(),
                ],
            });
        }
        for point in &self.points {
            commands.push(DrawCommand::Marker {
                position: point.position(),
            });
        }
        commands
    }

    /// The animated points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The triangle index triples.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Viewport width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Viewport height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The parameters this scene runs with.
    pub fn params(&self) -> &FlowParams {
        &self.params
    }
}
