#![deny(unsafe_code)]
//! Rendering surface for flowmesh scenes: a CPU rasterizer consuming the
//! core's draw commands, plus PNG snapshots (feature `png`, default on).
//!
//! The core treats rendering as an external collaborator; this crate is a
//! pure read-only consumer of [`flowmesh_core::DrawCommand`]s each frame.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::{render_frame, Raster};
