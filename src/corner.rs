//! Corner geometry solver.
//!
//! For an interior point with known neighbors, computes the turn angle and
//! the provisional blend distance along each adjacent edge such that a
//! circular fillet centered on the angle bisector deviates from the vertex
//! by at most the requested maximum.

use std::f64::consts::PI;

use crate::EPSILON_ANGLE;
use crate::buffer::ControlPoint;
use crate::vector::{self, Vec3};

/// Solve the corner at `point`, given the positions of its predecessor and
/// successor.
///
/// For a fillet of radius `r` between two edges meeting at angle `theta`,
/// the perpendicular sagitta from the vertex is `r * (1/sin(theta/2) - 1)`;
/// inverting for `r` given the target deviation `d` yields
/// `r = d * sin(theta/2) / (1 - sin(theta/2))`.
pub fn solve(point: &mut ControlPoint, prev: Vec3, next: Vec3) {
    let v1 = vector::sub(prev, point.position);
    let v2 = vector::sub(next, point.position);
    point.edge_len_in = vector::length(v1);
    point.turn_angle = vector::angle_between(v1, v2);
    if point.turn_angle < EPSILON_ANGLE || PI - point.turn_angle < EPSILON_ANGLE {
        // Near-reversal or near-straight: a pass-through is always valid.
        tracing::debug!(angle = point.turn_angle, "degenerate corner, no fillet");
        return;
    }
    let sin_half = (point.turn_angle / 2.0).sin();
    let tan_half = (point.turn_angle / 2.0).tan();
    let radius = point.max_deviation * sin_half / (1.0 - sin_half);
    point.blend_to_radius_ratio = tan_half;
    point.blend_dist = radius / tan_half;
}

/// Degenerate solve for a flush point (`max_deviation <= 0`): records the
/// incoming edge length and leaves the corner unrounded.
pub fn solve_flush(point: &mut ControlPoint, prev: Vec3) {
    point.edge_len_in = vector::distance(point.position, prev);
    point.turn_angle = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn right_angle_blend_distance() {
        // P=(0,0,0), C=(1,0,0), N=(1,1,0): theta = pi/2.
        let mut c = ControlPoint::new([1.0, 0.0, 0.0], 0.0, 0.1);
        solve(&mut c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        assert!((c.turn_angle - FRAC_PI_2).abs() < 1e-12);
        assert!((c.edge_len_in - 1.0).abs() < 1e-12);
        let sin_half = (FRAC_PI_2 / 2.0).sin();
        let radius = 0.1 * sin_half / (1.0 - sin_half);
        assert!((c.radius() - radius).abs() < 1e-12);
        // tan(pi/4) = 1, so blend distance equals the radius here.
        assert!((c.blend_dist - radius).abs() < 1e-12);
        assert!((c.blend_to_radius_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_get_no_fillet() {
        let mut c = ControlPoint::new([1.0, 0.0, 0.0], 0.0, 0.5);
        solve(&mut c, [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!((c.turn_angle - PI).abs() < 1e-9);
        assert_eq!(c.blend_dist, 0.0);
        assert_eq!(c.radius(), 0.0);
    }

    #[test]
    fn full_reversal_gets_no_fillet() {
        let mut c = ControlPoint::new([1.0, 0.0, 0.0], 0.0, 0.5);
        solve(&mut c, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        assert!(c.turn_angle < EPSILON_ANGLE);
        assert_eq!(c.blend_dist, 0.0);
    }

    #[test]
    fn zero_length_edge_is_degenerate() {
        let mut c = ControlPoint::new([1.0, 0.0, 0.0], 0.0, 0.5);
        solve(&mut c, [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(c.edge_len_in, 0.0);
        assert_eq!(c.blend_dist, 0.0);
    }

    #[test]
    fn flush_point_records_edge_length() {
        let mut c = ControlPoint::new([3.0, 4.0, 0.0], 0.0, 0.0);
        solve_flush(&mut c, [0.0, 0.0, 0.0]);
        assert!((c.edge_len_in - 5.0).abs() < 1e-12);
        assert_eq!(c.turn_angle, 0.0);
        assert_eq!(c.blend_dist, 0.0);
    }
}
