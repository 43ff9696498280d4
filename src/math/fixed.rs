//! 16.16 fixed-point scalar and the arithmetic primitives the vertex stage
//! is built on.
//!
//! # Formats
//! - `Fixed`: signed 16.16, the general-purpose coordinate format.
//! - `.28`: intermediate format of the perspective divide (`1/w` and NDC values).
//! - `28.4`: the rasterizer's edge-walking format, produced by [`tri_from_fixed`].
//!
//! All products are formed in 64 bits so that no intermediate overflows.

/// A signed 16.16 fixed-point value.
pub type Fixed = i32;

/// Number of fractional bits in [`Fixed`].
pub const FIXED_BITS: u32 = 16;

/// `1.0` in 16.16.
pub const FIXED_ONE: Fixed = 1 << FIXED_BITS;

/// Fractional bits of the rasterizer coordinate format.
pub const TRI_FRACTION_BITS: u32 = 4;

/// Fractional bits of the perspective-divide intermediates.
pub const RECIP_BITS: u32 = 28;

/// Converts a float to 16.16, rounding to nearest. Out-of-range values saturate.
#[inline]
pub fn from_f32(v: f32) -> Fixed {
    (v * FIXED_ONE as f32 + 0.5).floor() as Fixed
}

/// Converts 16.16 back to a float.
#[inline]
pub fn to_f32(x: Fixed) -> f32 {
    x as f32 / FIXED_ONE as f32
}

/// Integer to 16.16.
#[inline]
pub const fn from_int(n: i32) -> Fixed {
    n << FIXED_BITS
}

/// `(a * b) >> shift`, rounded to nearest.
#[inline]
pub fn mul_x(a: Fixed, b: Fixed, shift: u32) -> Fixed {
    debug_assert!(shift > 0 && shift < 63);
    ((a as i64 * b as i64 + (1i64 << (shift - 1))) >> shift) as Fixed
}

/// `((a * b) >> shift) + c`. The product is truncated, not rounded.
#[inline]
pub fn mul_add_x(a: Fixed, b: Fixed, c: Fixed, shift: u32) -> Fixed {
    (((a as i64 * b as i64) >> shift) as Fixed).wrapping_add(c)
}

/// Reciprocal of a 16.16 value, returned with `q` fractional bits.
///
/// Saturates to `i32::MAX`/`i32::MIN` when the result does not fit. `x == 0`
/// is a contract violation.
#[inline]
pub fn recip_q(x: Fixed, q: u32) -> Fixed {
    debug_assert!(x != 0, "reciprocal of zero");
    if x == 0 {
        return Fixed::MAX;
    }
    let r = (1i64 << (FIXED_BITS + q)) / x as i64;
    r.clamp(Fixed::MIN as i64, Fixed::MAX as i64) as Fixed
}

/// Reciprocal with 28 fractional bits, the `1/w` format stored in `window.w`.
#[inline]
pub fn recip28(x: Fixed) -> Fixed {
    recip_q(x, RECIP_BITS)
}

/// Narrows 16.16 to the rasterizer's 28.4 format (arithmetic shift, truncating).
#[inline]
pub const fn tri_from_fixed(x: Fixed) -> Fixed {
    x >> (FIXED_BITS - TRI_FRACTION_BITS)
}

/// Clamps a 16.16 value to `[0, 1]`.
#[inline]
pub fn clamp_x(x: Fixed) -> Fixed {
    x.clamp(0, FIXED_ONE)
}
