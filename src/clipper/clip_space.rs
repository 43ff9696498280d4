//! Frustum classification in homogeneous clip space.
//!
//! The view volume in clip space is always the cube
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! so classification is six comparisons rather than six plane equations.
//! No polygon is clipped here: the resulting code only feeds trivial accept
//! and trivial reject.

use crate::math::Matrixx;
use crate::projection;
use crate::vertex::{Vertex, VertexFlags};

/// The 6 planes of the canonical clip-space cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x >= -w
    Left,
    /// x <= w
    Right,
    /// y >= -w
    Bottom,
    /// y <= w
    Top,
    /// z >= -w
    Near,
    /// z <= w
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// The vertex flag set when this plane is violated.
    pub fn flag(self) -> VertexFlags {
        match self {
            Self::Left => VertexFlags::CLIP_L,
            Self::Right => VertexFlags::CLIP_R,
            Self::Bottom => VertexFlags::CLIP_B,
            Self::Top => VertexFlags::CLIP_T,
            Self::Near => VertexFlags::CLIP_N,
            Self::Far => VertexFlags::CLIP_F,
        }
    }
}

/// The 6-bit frustum code of a vertex. Points exactly on a plane are inside.
///
/// Compared in 64 bits so that `-w` exists for every `w`, `Fixed::MIN` included.
#[inline]
pub fn frustum_code(v: &Vertex) -> VertexFlags {
    let c = &v.clip;
    let (x, y, z, w) = (c.x as i64, c.y as i64, c.z as i64, c.w as i64);
    let mut code = VertexFlags::empty();
    if x < -w {
        code |= VertexFlags::CLIP_L;
    }
    if x > w {
        code |= VertexFlags::CLIP_R;
    }
    if y < -w {
        code |= VertexFlags::CLIP_B;
    }
    if y > w {
        code |= VertexFlags::CLIP_T;
    }
    if z < -w {
        code |= VertexFlags::CLIP_N;
    }
    if z > w {
        code |= VertexFlags::CLIP_F;
    }
    code
}

/// Frustum clipping followed by the perspective divide.
///
/// The full clip code (any user bits already on the vertex plus the frustum
/// bits) is OR'ed into the vertex and AND'ed into `cull`. Window coordinates
/// are only computed when that code is empty.
#[inline]
pub fn clip_frustum_perspective<const DEPTH: bool>(
    vpt: &Matrixx,
    cull: &mut VertexFlags,
    v: &mut Vertex,
) {
    let clip = v.clip_code() | frustum_code(v);

    v.flags |= clip;
    *cull &= clip;

    if clip.is_empty() {
        projection::perspective::<DEPTH>(vpt, v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{from_int, Fixed, FIXED_ONE};
    use crate::math::Vec4x;
    use crate::transform::TransformState;

    fn at(x: i32, y: i32, z: i32, w: i32) -> Vertex {
        Vertex::from_clip(Vec4x::new(from_int(x), from_int(y), from_int(z), from_int(w)))
    }

    fn vpt() -> Matrixx {
        *TransformState::new(100, 100).viewport_transform()
    }

    #[test]
    fn inside_points_have_empty_code() {
        for v in [
            at(0, 0, 0, 1),
            at(1, 1, 1, 1),
            at(-1, -1, -1, 1),
            at(3, -2, 1, 4),
            at(-5, 5, -5, 5),
        ] {
            assert!(frustum_code(&v).is_empty(), "{:?}", v.clip);
        }
    }

    #[test]
    fn each_plane_in_isolation() {
        let cases = [
            (at(-2, 0, 0, 1), ClipPlane::Left),
            (at(2, 0, 0, 1), ClipPlane::Right),
            (at(0, -2, 0, 1), ClipPlane::Bottom),
            (at(0, 2, 0, 1), ClipPlane::Top),
            (at(0, 0, -2, 1), ClipPlane::Near),
            (at(0, 0, 2, 1), ClipPlane::Far),
        ];
        for (v, plane) in cases {
            assert_eq!(frustum_code(&v), plane.flag(), "{plane:?}");
        }
    }

    #[test]
    fn planes_combine_independently() {
        assert_eq!(
            frustum_code(&at(-3, 3, 3, 1)),
            VertexFlags::CLIP_L | VertexFlags::CLIP_T | VertexFlags::CLIP_F
        );
        assert_eq!(
            frustum_code(&at(3, -3, -3, 1)),
            VertexFlags::CLIP_R | VertexFlags::CLIP_B | VertexFlags::CLIP_N
        );
    }

    #[test]
    fn negative_w_fails_opposite_planes() {
        // With w < 0 nothing can satisfy -w <= x <= w.
        let code = frustum_code(&at(0, 0, 0, -1));
        assert_eq!(code, VertexFlags::FRUSTUM_CLIP_ALL);
    }

    #[test]
    fn most_negative_w_fails_every_plane() {
        // Far behind the eye: the float-to-fixed conversion saturates w.
        let v = Vertex::from_clip(Vec4x::from_f32([0.0, 0.0, 0.0, -1.0e6]));
        assert_eq!(v.clip.w, Fixed::MIN);
        assert_eq!(frustum_code(&v), VertexFlags::FRUSTUM_CLIP_ALL);

        let mut v = Vertex::from_clip(Vec4x::new(Fixed::MAX, Fixed::MIN, Fixed::MAX, Fixed::MIN));
        let mut cull = VertexFlags::CLIP_ALL;
        clip_frustum_perspective::<true>(&vpt(), &mut cull, &mut v);
        assert_eq!(v.clip_code(), VertexFlags::FRUSTUM_CLIP_ALL);
        assert_eq!(v.window, Vec4x::ZERO);
    }

    #[test]
    fn boundary_is_inside() {
        let mut v = at(0, 0, 0, 1);
        v.clip.x = FIXED_ONE;
        v.clip.y = -FIXED_ONE;
        assert!(frustum_code(&v).is_empty());
        v.clip.x = FIXED_ONE + 1;
        assert_eq!(frustum_code(&v), VertexFlags::CLIP_R);
    }

    #[test]
    fn accepted_vertex_is_projected() {
        let mut cull = VertexFlags::CLIP_ALL;
        let mut v = at(0, 0, 0, 1);
        clip_frustum_perspective::<true>(&vpt(), &mut cull, &mut v);
        assert!(!v.is_clipped());
        assert!(cull.is_empty());
        assert_eq!(v.window.w, 1 << 28);
        assert_eq!(v.window.x, 50 << 4);
    }

    #[test]
    fn rejected_vertex_is_not_projected() {
        let mut cull = VertexFlags::CLIP_ALL;
        let mut v = at(5, 0, 0, 1);
        clip_frustum_perspective::<true>(&vpt(), &mut cull, &mut v);
        assert_eq!(v.clip_code(), VertexFlags::CLIP_R);
        assert_eq!(cull, VertexFlags::CLIP_R);
        assert_eq!(v.window, Vec4x::ZERO);
    }

    #[test]
    fn existing_user_bits_are_preserved_and_block_projection() {
        let mut cull = VertexFlags::CLIP_ALL;
        let mut v = at(0, 0, 0, 1);
        v.flags = VertexFlags::USER_CLIP_2 | VertexFlags::EYE;
        clip_frustum_perspective::<false>(&vpt(), &mut cull, &mut v);
        assert_eq!(v.flags, VertexFlags::USER_CLIP_2 | VertexFlags::EYE);
        assert_eq!(cull, VertexFlags::USER_CLIP_2);
        assert_eq!(v.window, Vec4x::ZERO);
    }
}
