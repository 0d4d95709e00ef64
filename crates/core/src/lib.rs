#![deny(unsafe_code)]
//! Core types for the flowmesh animated mesh.
//!
//! A decorative mesh of points and triangles drifts under a spatiotemporal
//! noise field, pulled home by anchor springs and nudged by pointer
//! proximity. This crate holds the whole numerical engine: [`Polar`]
//! vector algebra, the sliding [`NoiseField`] lattice, per-[`Point`]
//! physics, static [`Mesh`] topology, and the [`Scene`] tick driver.
//! It emits [`DrawCommand`]s for a rendering surface to consume.

pub mod config;
pub mod draw;
pub mod error;
pub mod math;
pub mod mesh;
pub mod noise;
pub mod params;
pub mod physics;
pub mod prng;
pub mod scene;
pub mod style;
pub mod vector;

pub use config::{FlowParams, MeshConfig, SceneConfig};
pub use draw::DrawCommand;
pub use error::FlowError;
pub use mesh::Mesh;
pub use noise::NoiseField;
pub use physics::Point;
pub use prng::Xorshift64;
pub use scene::Scene;
pub use style::{Srgb, Style};
pub use vector::Polar;
