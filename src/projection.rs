//! Perspective divide and viewport mapping.
//!
//! ```text
//! [x, y, z]window = vpt * ([x, y, z]clip / clip.w)
//! window.w        = 1 / clip.w
//! ```
//!
//! `DEPTH` is a const parameter so each pipeline specialization compiles to
//! its own copy without a per-vertex branch on the depth test.

use crate::math::fixed::{self, FIXED_BITS, RECIP_BITS};
use crate::math::Matrixx;
use crate::vertex::Vertex;

/// Shift from 16.16 up to the `.28` format of `window.w`.
const W_2D_SHIFT: u32 = RECIP_BITS - FIXED_BITS;

/// Divides clip coordinates by `w` and applies the viewport transform.
///
/// `window.x`/`window.y` are narrowed to 28.4; `window.z` stays 16.16 and is
/// only written when `DEPTH` is set. The caller guarantees `clip.w > 0`, i.e.
/// the vertex was not clipped.
#[inline]
pub fn perspective<const DEPTH: bool>(vpt: &Matrixx, v: &mut Vertex) {
    debug_assert!(v.clip.w > 0, "perspective divide on a clipped vertex");

    let rw = fixed::recip28(v.clip.w);
    let m = &vpt.m;
    v.window.w = rw;

    let x = fixed::mul_add_x(fixed::mul_x(v.clip.x, rw, FIXED_BITS), m[0], m[12], RECIP_BITS);
    let y = fixed::mul_add_x(fixed::mul_x(v.clip.y, rw, FIXED_BITS), m[5], m[13], RECIP_BITS);
    v.window.x = fixed::tri_from_fixed(x);
    v.window.y = fixed::tri_from_fixed(y);

    if DEPTH {
        v.window.z =
            fixed::mul_add_x(fixed::mul_x(v.clip.z, rw, FIXED_BITS), m[10], m[14], RECIP_BITS);
    }
}

/// Window coordinates for pre-transformed 2D content.
///
/// Assumes `w = 1` and that the viewport transform is already folded into
/// `clip`: x and y are only narrowed and z is copied.
#[inline]
pub fn perspective_2d(v: &mut Vertex) {
    v.window.x = fixed::tri_from_fixed(v.clip.x);
    v.window.y = fixed::tri_from_fixed(v.clip.y);
    v.window.z = v.clip.z;
    v.window.w = v.clip.w << W_2D_SHIFT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{from_f32, from_int, FIXED_ONE, TRI_FRACTION_BITS};
    use crate::math::Vec4x;
    use crate::transform::TransformState;
    use approx::assert_abs_diff_eq;

    fn vpt(width: i32, height: i32) -> Matrixx {
        *TransformState::new(width, height).viewport_transform()
    }

    fn tri(n: i32) -> i32 {
        n << TRI_FRACTION_BITS
    }

    #[test]
    fn center_maps_to_viewport_center() {
        let mut v = Vertex::from_clip(Vec4x::new(0, 0, 0, FIXED_ONE));
        perspective::<true>(&vpt(640, 480), &mut v);
        assert_eq!(v.window.x, tri(320));
        assert_eq!(v.window.y, tri(240));
        assert_eq!(v.window.z, FIXED_ONE / 2);
        assert_eq!(v.window.w, 1 << 28);
    }

    #[test]
    fn corners_map_to_viewport_edges() {
        let vpt = vpt(640, 480);
        let corner = Vec4x::new(from_int(2), from_int(-2), from_int(2), from_int(2));
        let mut v = Vertex::from_clip(corner);
        perspective::<true>(&vpt, &mut v);
        assert_eq!(v.window.x, tri(640));
        assert_eq!(v.window.y, 0);
        assert_eq!(v.window.z, FIXED_ONE);
        assert_eq!(v.window.w, 1 << 27);
    }

    #[test]
    fn window_w_is_reciprocal_of_clip_w() {
        let vpt = vpt(100, 100);
        for w in [0.75f32, 1.0, 3.0, 7.5, 100.0] {
            let mut v = Vertex::from_clip(Vec4x::new(0, 0, 0, from_f32(w)));
            perspective::<false>(&vpt, &mut v);
            let rw = v.window.w as f64 / (1u64 << 28) as f64;
            assert_abs_diff_eq!(rw, 1.0 / w as f64, epsilon = 1.0e-6);
        }
    }

    #[test]
    fn depth_is_left_alone_without_depth_test() {
        let mut v = Vertex::from_clip(Vec4x::new(0, 0, FIXED_ONE / 2, FIXED_ONE));
        v.window.z = 1234;
        perspective::<false>(&vpt(64, 64), &mut v);
        assert_eq!(v.window.z, 1234);
    }

    #[test]
    fn divide_by_w_matches_float_result() {
        let vpt = vpt(800, 600);
        let (x, y, w) = (1.3f32, -0.4f32, 2.6f32);
        let mut v = Vertex::from_clip(Vec4x::new(from_f32(x), from_f32(y), 0, from_f32(w)));
        perspective::<false>(&vpt, &mut v);
        let expect_x = (x / w) * 400.0 + 400.0;
        let expect_y = (y / w) * 300.0 + 300.0;
        let scale = (1 << TRI_FRACTION_BITS) as f32;
        assert_abs_diff_eq!(v.window.x as f32 / scale, expect_x, epsilon = 2.0 / scale);
        assert_abs_diff_eq!(v.window.y as f32 / scale, expect_y, epsilon = 2.0 / scale);
    }

    #[test]
    fn two_d_path_narrows_without_divide() {
        let clip = Vec4x::new(from_f32(12.5), from_f32(-3.25), 777, FIXED_ONE);
        let mut v = Vertex::from_clip(clip);
        perspective_2d(&mut v);
        assert_eq!(v.window.x, fixed::tri_from_fixed(clip.x));
        assert_eq!(v.window.y, fixed::tri_from_fixed(clip.y));
        assert_eq!(v.window.x, 200);
        assert_eq!(v.window.y, -52);
        assert_eq!(v.window.z, 777);
        assert_eq!(v.window.w, 1 << 28);
    }
}
