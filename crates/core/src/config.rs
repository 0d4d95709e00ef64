//! Tunable constants and the serializable scene description.
//!
//! `FlowParams` bundles every constant the physics and noise read each
//! tick; `SceneConfig` captures everything needed to rebuild a scene
//! exactly (viewport, seed, parameter overrides, optional explicit mesh).
//! Two identical configs produce identical animations.

use crate::error::FlowError;
use crate::mesh::Mesh;
use crate::params::param_f64;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Noise lattice spacing in viewport units.
const DEFAULT_GRID_SIZE: f64 = 400.0;
/// Milliseconds per noise time layer.
const DEFAULT_TIME_SCALE: f64 = 2000.0;
/// Magnitude of the noise-derived flow force.
const DEFAULT_FLOW_STRENGTH: f64 = 2.0;
/// Excursion below which the spring is fully slack.
const DEFAULT_MIN_DRIFT: f64 = 5.0;
/// Excursion cap; the spring saturates here and positions never pass it.
const DEFAULT_MAX_DRIFT: f64 = 40.0;
/// Spring magnitude at full saturation.
const DEFAULT_MAX_SPRING_FORCE: f64 = 4.0;
/// Per-tick velocity retention factor.
const DEFAULT_DAMPING: f64 = 0.97;
/// Velocity magnitude cap, units per second.
const DEFAULT_MAX_SPEED: f64 = 60.0;
/// Pointer effect radius.
const DEFAULT_POINTER_RADIUS: f64 = 120.0;
/// Pointer force magnitude at zero distance.
const DEFAULT_POINTER_STRENGTH: f64 = 30.0;
/// Anchor spacing for the generated grid mesh.
const DEFAULT_MESH_SPACING: f64 = 120.0;

/// Simulation parameters for the mesh animation.
///
/// Use [`Default`] for the calibrated values; [`FlowParams::from_json`]
/// accepts partial overrides.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FlowParams {
    /// Noise lattice spacing.
    pub grid_size: f64,
    /// Milliseconds per noise time layer.
    pub time_scale: f64,
    /// Flow force magnitude.
    pub flow_strength: f64,
    /// Spring dead-zone radius.
    pub min_drift: f64,
    /// Maximum excursion from an anchor.
    pub max_drift: f64,
    /// Spring magnitude at `max_drift`.
    pub max_spring_force: f64,
    /// Velocity retention per tick, in (0, 1).
    pub damping: f64,
    /// Velocity cap in units per second.
    pub max_speed: f64,
    /// Pointer effect radius.
    pub pointer_radius: f64,
    /// Pointer force at zero distance.
    pub pointer_strength: f64,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            time_scale: DEFAULT_TIME_SCALE,
            flow_strength: DEFAULT_FLOW_STRENGTH,
            min_drift: DEFAULT_MIN_DRIFT,
            max_drift: DEFAULT_MAX_DRIFT,
            max_spring_force: DEFAULT_MAX_SPRING_FORCE,
            damping: DEFAULT_DAMPING,
            max_speed: DEFAULT_MAX_SPEED,
            pointer_radius: DEFAULT_POINTER_RADIUS,
            pointer_strength: DEFAULT_POINTER_STRENGTH,
        }
    }
}

impl FlowParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        Self {
            grid_size: param_f64(params, "grid_size", DEFAULT_GRID_SIZE),
            time_scale: param_f64(params, "time_scale", DEFAULT_TIME_SCALE),
            flow_strength: param_f64(params, "flow_strength", DEFAULT_FLOW_STRENGTH),
            min_drift: param_f64(params, "min_drift", DEFAULT_MIN_DRIFT),
            max_drift: param_f64(params, "max_drift", DEFAULT_MAX_DRIFT),
            max_spring_force: param_f64(params, "max_spring_force", DEFAULT_MAX_SPRING_FORCE),
            damping: param_f64(params, "damping", DEFAULT_DAMPING),
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            pointer_radius: param_f64(params, "pointer_radius", DEFAULT_POINTER_RADIUS),
            pointer_strength: param_f64(params, "pointer_strength", DEFAULT_POINTER_STRENGTH),
        }
    }

    /// Validates every constraint the tick path relies on, so the hot loop
    /// never has to re-check.
    pub fn validate(&self) -> Result<(), FlowError> {
        let positive: [(&'static str, f64); 4] = [
            ("grid_size", self.grid_size),
            ("time_scale", self.time_scale),
            ("max_speed", self.max_speed),
            ("pointer_radius", self.pointer_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(FlowError::InvalidParam {
                    name,
                    value,
                    constraint: "must be strictly positive",
                });
            }
        }
        if !(self.min_drift >= 0.0) {
            return Err(FlowError::InvalidParam {
                name: "min_drift",
                value: self.min_drift,
                constraint: "must be non-negative",
            });
        }
        if !(self.max_drift > self.min_drift) {
            return Err(FlowError::InvalidParam {
                name: "max_drift",
                value: self.max_drift,
                constraint: "must exceed min_drift",
            });
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(FlowError::InvalidParam {
                name: "damping",
                value: self.damping,
                constraint: "must be in (0, 1)",
            });
        }
        if !(self.flow_strength >= 0.0) {
            return Err(FlowError::InvalidParam {
                name: "flow_strength",
                value: self.flow_strength,
                constraint: "must be non-negative",
            });
        }
        if !(self.max_spring_force >= 0.0) {
            return Err(FlowError::InvalidParam {
                name: "max_spring_force",
                value: self.max_spring_force,
                constraint: "must be non-negative",
            });
        }
        if !(self.pointer_strength >= 0.0) {
            return Err(FlowError::InvalidParam {
                name: "pointer_strength",
                value: self.pointer_strength,
                constraint: "must be non-negative",
            });
        }
        Ok(())
    }
}

/// Explicit mesh topology in a scene description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshConfig {
    /// Anchor positions as `[x, y]` pairs.
    pub anchors: Vec<[f64; 2]>,
    /// Triangle index triples into `anchors`.
    pub triangles: Vec<[usize; 3]>,
}

impl MeshConfig {
    /// Builds the validated mesh this config describes.
    pub fn to_mesh(&self) -> Result<Mesh, FlowError> {
        let anchors = self
            .anchors
            .iter()
            .map(|&[x, y]| DVec2::new(x, y))
            .collect();
        Mesh::new(anchors, self.triangles.clone())
    }
}

/// Reproducible description of a scene.
///
/// Contains the viewport, PRNG seed, parameter overrides (a partial JSON
/// object, applied over defaults), and optionally an explicit mesh. When
/// `mesh` is absent a triangulated grid with `mesh_spacing` is generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,
    pub seed: u64,
    #[serde(default = "empty_params")]
    pub params: Value,
    #[serde(default)]
    pub mesh: Option<MeshConfig>,
    #[serde(default)]
    pub mesh_spacing: Option<f64>,
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

impl SceneConfig {
    /// Creates a config with default params and a generated mesh.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            params: empty_params(),
            mesh: None,
            mesh_spacing: None,
        }
    }

    /// The resolved flow parameters (defaults plus overrides).
    pub fn flow_params(&self) -> FlowParams {
        FlowParams::from_json(&self.params)
    }

    /// The mesh this config describes: the explicit one if present,
    /// otherwise a triangulated grid covering the viewport.
    pub fn build_mesh(&self) -> Result<Mesh, FlowError> {
        match &self.mesh {
            Some(config) => config.to_mesh(),
            None => Mesh::triangulated_grid(
                self.width,
                self.height,
                self.mesh_spacing.unwrap_or(DEFAULT_MESH_SPACING),
            ),
        }
    }

    /// Validates the viewport and resolved parameters.
    pub fn validate(&self) -> Result<(), FlowError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(FlowError::InvalidDimensions);
        }
        self.flow_params().validate()
    }
}
