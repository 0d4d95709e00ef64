//! Draw primitives produced for the rendering surface.
//!
//! The core emits a flat command list each tick; how the commands become
//! pixels (or canvas paths, or anything else) is the surface's concern.

use glam::DVec2;

/// One primitive in a frame's draw list.
///
/// A scene emits every triangle first, then every marker, so markers sit
/// on top of the edges they terminate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// A closed path through three corner positions.
    Triangle { corners: [DVec2; 3] },
    /// A filled marker at a point's current position.
    Marker { position: DVec2 },
}
