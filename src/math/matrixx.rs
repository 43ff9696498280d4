//! Fixed-point 4x4 matrix used on the per-vertex path.
//!
//! Same column-major layout as [`Mat4`]: element `(row, col)` is
//! `m[col * 4 + row]`.

use super::fixed::{self, Fixed, FIXED_BITS};
use super::mat4::Mat4;
use super::vec4::Vec4x;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matrixx {
    pub m: [Fixed; 16],
}

impl Matrixx {
    pub fn identity() -> Self {
        Self::from(&Mat4::identity())
    }

    /// Transform a point with an implied `w = 1`. `v.w` is ignored.
    #[inline]
    pub fn point3(&self, v: &Vec4x) -> Vec4x {
        let m = &self.m;
        let row = |r: usize| -> Fixed {
            let sum = (m[r] as i64 * v.x as i64)
                .wrapping_add(m[4 + r] as i64 * v.y as i64)
                .wrapping_add(m[8 + r] as i64 * v.z as i64);
            ((sum >> FIXED_BITS) as Fixed).wrapping_add(m[12 + r])
        };
        Vec4x::new(row(0), row(1), row(2), row(3))
    }

    /// Transform a full homogeneous point.
    ///
    /// Like [`Matrixx::point3`], the 64-bit accumulation wraps on overflow.
    #[inline]
    pub fn point4(&self, v: &Vec4x) -> Vec4x {
        let m = &self.m;
        let row = |r: usize| -> Fixed {
            let sum = (m[r] as i64 * v.x as i64)
                .wrapping_add(m[4 + r] as i64 * v.y as i64)
                .wrapping_add(m[8 + r] as i64 * v.z as i64)
                .wrapping_add(m[12 + r] as i64 * v.w as i64);
            (sum >> FIXED_BITS) as Fixed
        };
        Vec4x::new(row(0), row(1), row(2), row(3))
    }
}

impl From<&Mat4> for Matrixx {
    fn from(src: &Mat4) -> Self {
        let mut m = [0; 16];
        for (dst, &f) in m.iter_mut().zip(src.as_cols_array().iter()) {
            *dst = fixed::from_f32(f);
        }
        Self { m }
    }
}

impl Default for Matrixx {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{from_int, FIXED_ONE};

    #[test]
    fn identity_is_fixed_one_on_diagonal() {
        let m = Matrixx::identity();
        assert_eq!(m.m[0], FIXED_ONE);
        assert_eq!(m.m[5], FIXED_ONE);
        assert_eq!(m.m[10], FIXED_ONE);
        assert_eq!(m.m[15], FIXED_ONE);
        assert_eq!(m.m[12], 0);
    }

    #[test]
    fn point3_applies_translation() {
        let m = Matrixx::from(&Mat4::translation(1.0, -2.0, 3.0));
        let p = m.point3(&Vec4x::point(from_int(1), from_int(1), from_int(1)));
        assert_eq!(p, Vec4x::new(from_int(2), from_int(-1), from_int(4), FIXED_ONE));
    }

    #[test]
    fn point4_scales_with_w() {
        let m = Matrixx::from(&Mat4::translation(1.0, 0.0, 0.0));
        let p = m.point4(&Vec4x::new(0, 0, 0, from_int(2)));
        assert_eq!(p.x, from_int(2));
        assert_eq!(p.w, from_int(2));
    }

    #[test]
    fn point4_of_frustum_produces_negated_w() {
        let m = Matrixx::from(&Mat4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0));
        let p = m.point4(&Vec4x::point(0, 0, from_int(-5)));
        assert_eq!(p.w, from_int(5));
    }

    #[test]
    fn saturated_inputs_wrap_instead_of_overflowing() {
        let m = Matrixx { m: [Fixed::MIN; 16] };
        let v = Vec4x::new(Fixed::MIN, Fixed::MIN, Fixed::MIN, Fixed::MIN);
        // Four products of 2^62 sum to 2^64, which wraps to zero.
        assert_eq!(m.point4(&v), Vec4x::ZERO);
        // Three products wrap to -2^62, whose low 32 bits after the shift are
        // zero, leaving only the translation column.
        assert_eq!(m.point3(&v).x, Fixed::MIN);

        let m = Matrixx { m: [Fixed::MAX; 16] };
        let v = Vec4x::new(Fixed::MAX, Fixed::MIN, Fixed::MAX, Fixed::MIN);
        let _ = m.point3(&v);
        let _ = m.point4(&v);
    }
}
