//! 4D fixed-point vector for homogeneous coordinates.

use super::fixed::{self, Fixed, FIXED_BITS, FIXED_ONE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vec4x {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
    pub w: Fixed,
}

impl Vec4x {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: Fixed, y: Fixed, z: Fixed, w: Fixed) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self::new(x, y, z, FIXED_ONE)
    }

    /// Create a point (w=1) from float coordinates.
    pub fn point_f32(x: f32, y: f32, z: f32) -> Self {
        Self::point(fixed::from_f32(x), fixed::from_f32(y), fixed::from_f32(z))
    }

    pub fn from_f32(v: [f32; 4]) -> Self {
        Self::new(
            fixed::from_f32(v[0]),
            fixed::from_f32(v[1]),
            fixed::from_f32(v[2]),
            fixed::from_f32(v[3]),
        )
    }

    /// Four-component dot product in 16.16.
    ///
    /// Products are accumulated in 64 bits and shifted once at the end.
    /// Out-of-range inputs wrap rather than trap.
    #[inline]
    pub fn dot4(&self, other: &Self) -> Fixed {
        let sum = (self.x as i64 * other.x as i64)
            .wrapping_add(self.y as i64 * other.y as i64)
            .wrapping_add(self.z as i64 * other.z as i64)
            .wrapping_add(self.w as i64 * other.w as i64);
        (sum >> FIXED_BITS) as Fixed
    }
}

impl From<[Fixed; 4]> for Vec4x {
    fn from(v: [Fixed; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::from_int;

    #[test]
    fn point_has_unit_w() {
        let p = Vec4x::point_f32(1.0, -2.0, 0.5);
        assert_eq!(p.w, FIXED_ONE);
        assert_eq!(p.y, from_int(-2));
    }

    #[test]
    fn dot4_of_plane_and_point() {
        // plane x + 2 = 0 against point (-3, 0, 0)
        let plane = Vec4x::new(FIXED_ONE, 0, 0, from_int(2));
        let p = Vec4x::point(from_int(-3), 0, 0);
        assert_eq!(plane.dot4(&p), from_int(-1));
    }

    #[test]
    fn dot4_does_not_overflow_intermediates() {
        let a = Vec4x::new(from_int(100), from_int(100), 0, 0);
        assert_eq!(a.dot4(&a), from_int(20_000));
    }

    #[test]
    fn dot4_of_saturated_components_wraps() {
        let a = Vec4x::new(Fixed::MIN, Fixed::MIN, Fixed::MIN, Fixed::MIN);
        // Four products of 2^62 sum to 2^64, which wraps to zero.
        assert_eq!(a.dot4(&a), 0);
        let b = Vec4x::new(Fixed::MAX, Fixed::MAX, Fixed::MAX, Fixed::MAX);
        let _ = a.dot4(&b);
    }
}
