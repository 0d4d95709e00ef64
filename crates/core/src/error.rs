//! Error types for the flowmesh core.
//!
//! Everything that can fail does so at construction time; the per-tick hot
//! path (force update, integration, draw emission) is infallible once a
//! `Scene` exists.

use thiserror::Error;

/// Errors produced when building or configuring a scene.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Viewport width or height was not strictly positive.
    #[error("invalid dimensions: width and height must be positive")]
    InvalidDimensions,

    /// A numeric parameter violated its constraint.
    #[error("invalid parameter '{name}': {value} ({constraint})")]
    InvalidParam {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A triangle referenced a point index the mesh does not have.
    #[error("triangle {triangle} references point {index} but the mesh has {points} points")]
    PointIndexOutOfBounds {
        triangle: usize,
        index: usize,
        points: usize,
    },

    /// An anchor lay outside the viewport the noise lattice covers.
    #[error("anchor {index} at ({x}, {y}) lies outside the {width}x{height} viewport")]
    AnchorOutOfBounds {
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
