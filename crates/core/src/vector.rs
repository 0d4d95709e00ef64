//! Polar-form 2D vectors.
//!
//! Forces and velocities are carried as angle/magnitude pairs and only
//! converted to Cartesian components at the edges (summation, integration).
//! This module is the single place the screen-space sign convention is
//! fixed: y grows **downward** and angles run clockwise from east, so
//! 0° = east, 90° = south, 180° = west, 270° = north. Every component
//! produced or consumed anywhere in the crate uses this convention.

use glam::DVec2;

/// An immutable 2D vector in polar form.
///
/// `angle` is in degrees, normalized to [0, 360) with a true modulo
/// (−10 → 350). `magnitude` is non-negative. Combining vectors always
/// constructs a fresh value; there are no in-place mutators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    angle: f64,
    magnitude: f64,
}

impl Polar {
    /// The zero vector (angle 0, magnitude 0).
    pub const ZERO: Polar = Polar {
        angle: 0.0,
        magnitude: 0.0,
    };

    /// Creates a vector from an angle in degrees and a magnitude.
    ///
    /// The angle is normalized to [0, 360); the magnitude is stored as
    /// given and expected to be non-negative.
    pub fn new(angle_deg: f64, magnitude: f64) -> Self {
        debug_assert!(magnitude >= 0.0, "negative magnitude: {magnitude}");
        Self {
            angle: normalize_angle(angle_deg),
            magnitude,
        }
    }

    /// Builds a vector from Cartesian components.
    ///
    /// The angle is `atan2(y, x)` in degrees (normalized) and the magnitude
    /// is `hypot(x, y)`. `from_components(0, 0)` yields angle 0, magnitude 0.
    pub fn from_components(x: f64, y: f64) -> Self {
        Self::new(y.atan2(x).to_degrees(), x.hypot(y))
    }

    /// Angle in degrees, in [0, 360).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Magnitude (length) of the vector.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Horizontal component: `magnitude · cos(angle)`.
    pub fn x(&self) -> f64 {
        self.magnitude * self.angle.to_radians().cos()
    }

    /// Vertical component: `magnitude · sin(angle)`, positive downward.
    pub fn y(&self) -> f64 {
        self.magnitude * self.angle.to_radians().sin()
    }

    /// Both components as a `DVec2`.
    pub fn components(&self) -> DVec2 {
        DVec2::new(self.x(), self.y())
    }

    /// A copy of this vector with the same angle and a new magnitude.
    pub fn with_magnitude(&self, magnitude: f64) -> Self {
        Self::new(self.angle, magnitude)
    }

    /// Sums any number of vectors by Cartesian accumulation.
    ///
    /// Commutative and associative up to floating error; the sum of a
    /// single vector returns that vector unchanged (within tolerance).
    pub fn sum(vectors: &[Polar]) -> Polar {
        let mut total_x = 0.0;
        let mut total_y = 0.0;
        for v in vectors {
            total_x += v.x();
            total_y += v.y();
        }
        Polar::from_components(total_x, total_y)
    }

    /// Dot product `m₁ · m₂ · cos(Δ)` where `Δ` is the minimal angular
    /// difference between the two vectors, always taken on the short arc
    /// (≤ 180°).
    pub fn dot(a: &Polar, b: &Polar) -> f64 {
        let diff = (a.angle - b.angle).abs();
        let diff = diff.min(360.0 - diff);
        a.magnitude * b.magnitude * diff.to_radians().cos()
    }
}

/// Normalizes any angle in degrees to [0, 360) with a true modulo.
fn normalize_angle(angle_deg: f64) -> f64 {
    let a = angle_deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative can round up to exactly 360.0.
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}
