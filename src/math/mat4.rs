//! 4x4 floating-point transformation matrix in GL column-major layout.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * v`
//! - Storage is column-major, element `(row, col)` lives at `m[col * 4 + row]`
//! - Translation is stored in `m[12]`, `m[13]`, `m[14]`
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! This is the "master" copy of a transform. The per-vertex stage works on
//! the fixed-point [`Matrixx`](super::matrixx::Matrixx) derived from it.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    /// Creates a matrix from a column-major array.
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub const fn identity() -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::identity();
        r.m[12] = x;
        r.m[13] = y;
        r.m[14] = z;
        r
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::identity();
        r.m[0] = x;
        r.m[5] = y;
        r.m[10] = z;
        r
    }

    /// Counter-clockwise rotation about the X axis (right-handed).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[5] = c;
        r.m[6] = s;
        r.m[9] = -s;
        r.m[10] = c;
        r
    }

    /// Counter-clockwise rotation about the Y axis (right-handed).
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[0] = c;
        r.m[2] = -s;
        r.m[8] = s;
        r.m[10] = c;
        r
    }

    /// Counter-clockwise rotation about the Z axis (right-handed).
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[0] = c;
        r.m[1] = s;
        r.m[4] = -s;
        r.m[5] = c;
        r
    }

    /// Perspective frustum, same layout as `glFrustum`. Clip-space `w` is `-z_eye`.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;
        Self::from_cols_array([
            2.0 * near / rl,
            0.0,
            0.0,
            0.0,
            0.0,
            2.0 * near / tb,
            0.0,
            0.0,
            (right + left) / rl,
            (top + bottom) / tb,
            -(far + near) / fnr,
            -1.0,
            0.0,
            0.0,
            -2.0 * far * near / fnr,
            0.0,
        ])
    }

    /// Symmetric perspective frustum from a vertical field of view in radians.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let t = near * (fov_y / 2.0).tan();
        let r = t * aspect_ratio;
        Self::frustum(-r, r, -t, t, near, far)
    }

    pub fn transpose(&self) -> Self {
        let mut r = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                r[row * 4 + col] = self.m[col * 4 + row];
            }
        }
        Self::from_cols_array(r)
    }

    /// Computes the inverse of the matrix, if it exists.
    /// Returns `None` if the matrix is singular (determinant is zero).
    pub fn inverse(&self) -> Option<Mat4> {
        let m = &self.m;
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];

        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];

        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];

        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        if det.abs() < f32::EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        for v in inv.iter_mut() {
            *v *= inv_det;
        }
        Some(Self::from_cols_array(inv))
    }

    /// Element `i` in column-major order.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.m[index]
    }

    #[inline]
    pub fn set(&mut self, index: usize, value: f32) {
        self.m[index] = value;
    }

    #[inline]
    pub fn as_cols_array(&self) -> &[f32; 16] {
        &self.m
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut r = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                r[col * 4 + row] = (0..4)
                    .map(|k| self.m[k * 4 + row] * rhs.m[col * 4 + k])
                    .sum();
            }
        }
        Mat4::from_cols_array(r)
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
