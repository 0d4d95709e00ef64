//! Per-point force accumulation and position integration.
//!
//! Each mesh point carries a fixed anchor and a drifting position. Every
//! tick it gathers the noise-derived flow, a spring return toward its
//! anchor, and any transient pointer push, then damps, corrects overshoot,
//! clamps speed, and integrates. The composition order is load-bearing:
//! flow and spring join the velocity before damping, the overshoot
//! correction sees the damped velocity, and the speed clamp runs last.

use crate::config::FlowParams;
use crate::math::{smoothstep, unit_ramp};
use crate::noise::NoiseField;
use crate::vector::Polar;
use glam::DVec2;

/// A single animated mesh point.
///
/// Created once at scene build; lives for the process lifetime. The anchor
/// never moves; the position is kept within `max_drift` of it.
#[derive(Debug, Clone)]
pub struct Point {
    anchor: DVec2,
    position: DVec2,
    velocity: Polar,
    pointer_force: Polar,
}

impl Point {
    /// Creates a point at rest on its anchor.
    pub fn new(anchor: DVec2) -> Self {
        Self {
            anchor,
            position: anchor,
            velocity: Polar::ZERO,
            pointer_force: Polar::ZERO,
        }
    }

    /// The fixed rest position.
    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    /// The current position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// The current velocity.
    pub fn velocity(&self) -> Polar {
        self.velocity
    }

    /// The pointer force currently applied to this point.
    pub fn pointer_force(&self) -> Polar {
        self.pointer_force
    }

    /// Accumulates this tick's forces into the velocity.
    ///
    /// 1. Flow: the noise field sampled at the **anchor** and time `t`,
    ///    mapped to a direction by `angle = sample·180 + 180`, with fixed
    ///    magnitude `flow_strength`.
    /// 2. Spring: toward the anchor, magnitude ramping smoothly from 0 at
    ///    `min_drift` to `max_spring_force` at `max_drift`.
    /// 3. Both (plus the pointer force while its magnitude is non-zero) sum
    ///    into the velocity.
    /// 4. Damping scales the magnitude every tick, unconditionally.
    /// 5. Past `max_drift`, any positive outward radial component of the
    ///    velocity is cancelled exactly; inward motion stays free.
    /// 6. The magnitude is clamped to `max_speed`.
    pub fn update_force(&mut self, noise: &NoiseField, t: f64, params: &FlowParams) {
        let sample = noise.sample(self.anchor.x, self.anchor.y, t);
        let flow = Polar::new(sample * 180.0 + 180.0, params.flow_strength);

        let offset = self.position - self.anchor;
        let excursion = offset.length();
        let spring_magnitude = smoothstep(unit_ramp(excursion, params.min_drift, params.max_drift))
            * params.max_spring_force;
        let spring =
            Polar::from_components(-offset.x, -offset.y).with_magnitude(spring_magnitude);

        let summed = if self.pointer_force.magnitude() > 0.0 {
            Polar::sum(&[self.velocity, flow, spring, self.pointer_force])
        } else {
            Polar::sum(&[self.velocity, flow, spring])
        };

        let mut velocity = summed.with_magnitude(summed.magnitude() * params.damping);

        if excursion > params.max_drift {
            let outward = Polar::from_components(offset.x, offset.y).with_magnitude(1.0);
            let radial = Polar::dot(&velocity, &outward);
            if radial > 0.0 {
                velocity = Polar::sum(&[velocity, Polar::new(outward.angle() + 180.0, radial)]);
            }
        }

        if velocity.magnitude() > params.max_speed {
            velocity = velocity.with_magnitude(params.max_speed);
        }
        self.velocity = velocity;
    }

    /// Integrates the position over `dt_ms` milliseconds (velocity is in
    /// units per second), then hard-clamps the excursion to `max_drift`.
    ///
    /// The clamp is an absolute bound independent of the overshoot
    /// correction in [`Point::update_force`]: it holds even under a large
    /// `dt` or a force spike.
    pub fn update_position(&mut self, dt_ms: f64, params: &FlowParams) {
        self.position += self.velocity.components() * (dt_ms / 1000.0);

        let offset = self.position - self.anchor;
        let excursion = offset.length();
        if excursion > params.max_drift {
            self.position = self.anchor + offset * (params.max_drift / excursion);
        }
    }

    /// Reacts to a pointer-position event.
    ///
    /// Within `pointer_radius`, the pointer force points from the pointer
    /// toward this point with magnitude falling linearly from
    /// `pointer_strength` at distance 0 to 0 at the radius. At exactly zero
    /// distance the direction degenerates to angle 0 (east) at full
    /// strength, never NaN. Outside the radius the magnitude is zeroed;
    /// the vector itself is kept.
    pub fn apply_pointer(&mut self, pointer: DVec2, params: &FlowParams) {
        let delta = self.position - pointer;
        let distance = delta.length();
        if distance < params.pointer_radius {
            let strength = params.pointer_strength * (1.0 - distance / params.pointer_radius);
            self.pointer_force =
                Polar::from_components(delta.x, delta.y).with_magnitude(strength);
        } else {
            self.pointer_force = self.pointer_force.with_magnitude(0.0);
        }
    }

    /// Zeroes the pointer force (pointer left the surface).
    pub fn clear_pointer(&mut self) {
        self.pointer_force = self.pointer_force.with_magnitude(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseField;

    fn noise() -> NoiseField {
        NoiseField::new(800.0, 600.0, 400.0, 2000.0, 42).unwrap()
    }

    fn still_params() -> FlowParams {
        // No flow and no spring: only damping and clamps act.
        FlowParams {
            flow_strength: 0.0,
            max_spring_force: 0.0,
            ..FlowParams::default()
        }
    }

    #[test]
    fn new_point_rests_on_its_anchor() {
        let p = Point::new(DVec2::new(100.0, 200.0));
        assert_eq!(p.position(), p.anchor());
        assert_eq!(p.velocity().magnitude(), 0.0);
        assert_eq!(p.pointer_force().magnitude(), 0.0);
    }

    #[test]
    fn point_at_anchor_with_no_forces_stays_put() {
        let noise = noise();
        let params = still_params();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        for tick in 0..50 {
            p.update_force(&noise, tick as f64 * 16.0, &params);
            p.update_position(16.0, &params);
        }
        assert!((p.position() - p.anchor()).length() < 1e-9);
    }

    #[test]
    fn damping_decays_velocity_exponentially() {
        let noise = noise();
        let params = still_params();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.velocity = Polar::new(37.0, 10.0);
        for _ in 0..100 {
            p.update_force(&noise, 0.0, &params);
        }
        let expected = 10.0 * 0.97_f64.powi(100);
        assert!(
            (p.velocity().magnitude() - expected).abs() < 1e-6,
            "magnitude {} after 100 ticks, expected ≈ {expected}",
            p.velocity().magnitude()
        );
    }

    #[test]
    fn flow_alone_contributes_its_fixed_magnitude() {
        let noise = noise();
        let params = FlowParams {
            max_spring_force: 0.0,
            ..FlowParams::default()
        };
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.update_force(&noise, 0.0, &params);
        let expected = params.flow_strength * params.damping;
        assert!((p.velocity().magnitude() - expected).abs() < 1e-9);
    }

    #[test]
    fn velocity_never_exceeds_max_speed_after_update() {
        let noise = noise();
        let params = FlowParams {
            flow_strength: 1000.0,
            ..FlowParams::default()
        };
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        for tick in 0..20 {
            p.update_force(&noise, tick as f64 * 16.0, &params);
            assert!(p.velocity().magnitude() <= params.max_speed + 1e-9);
            p.update_position(16.0, &params);
        }
    }

    #[test]
    fn excursion_is_hard_clamped_to_max_drift() {
        let noise = noise();
        let params = still_params();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.position = p.anchor + DVec2::new(100.0, 0.0);
        for tick in 0..50 {
            p.update_force(&noise, tick as f64 * 16.0, &params);
            p.update_position(16.0, &params);
            let excursion = (p.position() - p.anchor()).length();
            assert!(
                excursion <= params.max_drift + 1e-9,
                "excursion {excursion} exceeds {} at tick {tick}",
                params.max_drift
            );
        }
    }

    #[test]
    fn first_clamp_lands_exactly_on_max_drift() {
        let params = still_params();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.position = p.anchor + DVec2::new(100.0, 0.0);
        p.update_position(16.0, &params);
        let excursion = (p.position() - p.anchor()).length();
        assert!((excursion - params.max_drift).abs() < 1e-9);
    }

    #[test]
    fn overshoot_correction_cancels_outward_motion() {
        let noise = noise();
        let params = still_params();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.position = p.anchor + DVec2::new(50.0, 0.0);
        p.velocity = Polar::new(0.0, 10.0); // heading straight outward
        p.update_force(&noise, 0.0, &params);
        assert!(
            p.velocity().magnitude() < 1e-9,
            "outward velocity survived: {}",
            p.velocity().magnitude()
        );
    }

    #[test]
    fn overshoot_correction_permits_inward_motion() {
        let noise = noise();
        let params = still_params();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.position = p.anchor + DVec2::new(50.0, 0.0);
        p.velocity = Polar::new(180.0, 10.0); // heading back toward the anchor
        p.update_force(&noise, 0.0, &params);
        let expected = 10.0 * params.damping;
        assert!((p.velocity().magnitude() - expected).abs() < 1e-9);
    }

    #[test]
    fn pointer_at_zero_distance_gives_full_strength_east() {
        let params = FlowParams::default();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.apply_pointer(p.position(), &params);
        let force = p.pointer_force();
        assert!((force.magnitude() - params.pointer_strength).abs() < 1e-9);
        assert_eq!(force.angle(), 0.0);
        assert!(force.x().is_finite() && force.y().is_finite());
    }

    #[test]
    fn pointer_force_falls_off_linearly() {
        let params = FlowParams::default();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        let half = params.pointer_radius / 2.0;
        p.apply_pointer(p.position() - DVec2::new(half, 0.0), &params);
        let force = p.pointer_force();
        assert!((force.magnitude() - params.pointer_strength / 2.0).abs() < 1e-9);
        // Directed from the pointer toward the point: due east.
        assert!(force.angle().abs() < 1e-9);
    }

    #[test]
    fn pointer_outside_radius_zeroes_the_magnitude() {
        let params = FlowParams::default();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.apply_pointer(p.position() - DVec2::new(30.0, 0.0), &params);
        assert!(p.pointer_force().magnitude() > 0.0);
        p.apply_pointer(p.position() - DVec2::new(params.pointer_radius * 2.0, 0.0), &params);
        assert_eq!(p.pointer_force().magnitude(), 0.0);
    }

    #[test]
    fn clear_pointer_zeroes_the_magnitude() {
        let params = FlowParams::default();
        let mut p = Point::new(DVec2::new(120.0, 80.0));
        p.apply_pointer(p.position() - DVec2::new(10.0, 0.0), &params);
        assert!(p.pointer_force().magnitude() > 0.0);
        p.clear_pointer();
        assert_eq!(p.pointer_force().magnitude(), 0.0);
    }
}
