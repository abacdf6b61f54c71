//! 3D vector helpers for corner geometry.
//!
//! Positions and directions are plain `[f64; 3]` arrays; everything here is
//! a stateless function over them.

/// A 3D coordinate or direction.
pub type Vec3 = [f64; 3];

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn scale(v: Vec3, n: f64) -> Vec3 {
    [v[0] * n, v[1] * n, v[2] * n]
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn length(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(sub(a, b))
}

/// Unit vector in the direction of `v`. The caller must not pass a
/// zero-length vector.
pub fn normalize(v: Vec3) -> Vec3 {
    scale(v, 1.0 / length(v))
}

/// Undirected angle between two vectors, in `[0, pi]`.
pub fn angle_between(a: Vec3, b: Vec3) -> f64 {
    length(cross(a, b)).atan2(dot(a, b))
}

/// Rotate `v` by `angle` radians about a normalized `axis`
/// (Rodrigues rotation).
pub fn rotate(v: Vec3, angle: f64, axis: Vec3) -> Vec3 {
    Rotation::about_axis(angle, axis).apply(v)
}

/// Row-major 3x3 rotation matrix, built once and applied repeatedly when
/// walking arc chords.
#[derive(Debug, Clone, Copy)]
pub struct Rotation([f64; 9]);

impl Rotation {
    /// Rotation by `angle` radians about a normalized `axis`.
    pub fn about_axis(angle: f64, axis: Vec3) -> Self {
        let s = angle.sin();
        let c = angle.cos();
        let t = 1.0 - c;
        let [x, y, z] = axis;
        Rotation([
            t * x * x + c,
            t * x * y - s * z,
            t * x * z + s * y,
            t * x * y + s * z,
            t * y * y + c,
            t * y * z - s * x,
            t * x * z - s * y,
            t * y * z + s * x,
            t * z * z + c,
        ])
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        let m = &self.0;
        [
            v[0] * m[0] + v[1] * m[1] + v[2] * m[2],
            v[0] * m[3] + v[1] * m[4] + v[2] * m[5],
            v[0] * m[6] + v[1] * m[7] + v[2] * m[8],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_vec_near(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn angle_between_perpendicular() {
        let a = angle_between([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!((a - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn angle_between_opposite() {
        let a = angle_between([1.0, 0.0, 0.0], [-2.0, 0.0, 0.0]);
        assert!((a - PI).abs() < 1e-12);
    }

    #[test]
    fn rotate_x_about_z() {
        let v = rotate([1.0, 0.0, 0.0], FRAC_PI_2, [0.0, 0.0, 1.0]);
        assert_vec_near(v, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn rotation_matrix_matches_single_rotation() {
        let axis = normalize([1.0, 2.0, -0.5]);
        let v = [0.3, -1.2, 2.0];
        let m = Rotation::about_axis(0.7, axis);
        assert_vec_near(m.apply(v), rotate(v, 0.7, axis));
    }

    #[test]
    fn incremental_rotation_composes() {
        let axis = [0.0, 0.0, 1.0];
        let step = Rotation::about_axis(FRAC_PI_2 / 3.0, axis);
        let mut v = [1.0, 0.0, 0.0];
        for _ in 0..3 {
            v = step.apply(v);
        }
        assert_vec_near(v, [0.0, 1.0, 0.0]);
    }
}
