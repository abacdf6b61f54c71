//! Arc tessellation.
//!
//! A finalized corner's fillet is approximated by a run of straight chords,
//! each no longer than the configured resolution.

use std::f64::consts::FRAC_PI_2;

use crate::buffer::ControlPoint;
use crate::vector::{self, Rotation, Vec3};

/// Chord vertices approximating the fillet at `corner`, given the positions
/// of its predecessor and successor.
///
/// Returns `None` when the arc is too small to matter at the configured
/// resolution (fewer than one chord); the caller falls back to a single
/// move to the vertex itself.
pub fn tessellate(corner: &ControlPoint, prev: Vec3, next: Vec3, resolution: f64) -> Option<Vec<Vec3>> {
    let radius = corner.radius();
    let segments = (radius * corner.turn_angle / resolution).floor() as i64;
    if segments < 1 {
        return None;
    }
    let segments = segments as usize;

    let vp = vector::normalize(vector::sub(prev, corner.position));
    let vn = vector::normalize(vector::sub(next, corner.position));
    let axis = vector::normalize(vector::cross(vp, vn));
    let start = vector::add(corner.position, vector::scale(vp, corner.blend_dist));
    // Spoke: radius vector from the arc center to the start point, found by
    // rotating the incoming direction a quarter turn about the arc axis.
    let mut spoke = vector::scale(vector::rotate(vp, FRAC_PI_2, axis), -radius);
    let center = vector::sub(start, spoke);

    // Walk the rim counter to the corner's turn direction.
    let step = Rotation::about_axis(-corner.turn_angle / segments as f64, axis);
    let mut vertices = Vec::with_capacity(segments + 1);
    vertices.push(vector::add(center, spoke));
    for _ in 0..segments {
        spoke = step.apply(spoke);
        vertices.push(vector::add(center, spoke));
    }
    Some(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corner;

    fn right_angle_corner(max_deviation: f64) -> ControlPoint {
        let mut c = ControlPoint::new([1.0, 0.0, 0.0], 0.0, max_deviation);
        corner::solve(&mut c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        c
    }

    #[test]
    fn vertex_count_matches_resolution() {
        let c = right_angle_corner(0.1);
        let verts = tessellate(&c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], 0.1).unwrap();
        let expected = (c.radius() * c.turn_angle / 0.1).floor() as usize + 1;
        assert_eq!(verts.len(), expected);
        assert_eq!(verts.len(), 4);
    }

    #[test]
    fn arc_spans_the_tangent_points() {
        let c = right_angle_corner(0.1);
        let verts = tessellate(&c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], 0.01).unwrap();
        let first = verts.first().unwrap();
        let last = verts.last().unwrap();
        // Tangent points sit blend_dist along each edge from the vertex.
        let b = c.blend_dist;
        assert!(vector::distance(*first, [1.0 - b, 0.0, 0.0]) < 1e-9);
        assert!(vector::distance(*last, [1.0, b, 0.0]) < 1e-9);
    }

    #[test]
    fn vertices_stay_on_the_fillet_circle() {
        let c = right_angle_corner(0.1);
        let verts = tessellate(&c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], 0.01).unwrap();
        let r = c.radius();
        let center = [1.0 - c.blend_dist, r, 0.0];
        for v in &verts {
            assert!((vector::distance(*v, center) - r).abs() < 1e-9);
        }
    }

    #[test]
    fn deviation_from_vertex_is_bounded_by_d() {
        let c = right_angle_corner(0.1);
        let verts = tessellate(&c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], 0.005).unwrap();
        let min = verts
            .iter()
            .map(|v| vector::distance(*v, c.position))
            .fold(f64::INFINITY, f64::min);
        // With chords this fine the closest vertex sits essentially at the
        // requested deviation from the corner.
        assert!((min - 0.1).abs() < 2e-3, "min deviation {min}");
        assert!(min > 0.1 - 1e-9);
    }

    #[test]
    fn tiny_radius_collapses() {
        let c = right_angle_corner(0.001);
        assert!(tessellate(&c, [0.0, 0.0, 0.0], [1.0, 1.0, 0.0], 1.0).is_none());
    }

    #[test]
    fn unrounded_corner_collapses() {
        let mut c = ControlPoint::new([1.0, 0.0, 0.0], 0.0, 0.5);
        corner::solve(&mut c, [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!(tessellate(&c, [0.0, 0.0, 0.0], [2.0, 0.0, 0.0], 0.01).is_none());
    }
}
