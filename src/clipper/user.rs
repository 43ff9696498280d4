//! User clip planes, tested in eye space.

use crate::clip_planes::ClipPlanes;
use crate::math::Matrixx;
use crate::vertex::{Vertex, VertexFlags};

use super::clip_space;

/// Computes eye coordinates and the user clip bits of `v`.
///
/// A plane rejects the vertex when `dot(plane, eye) < 0`. Bits are OR'ed into
/// the vertex flags together with [`VertexFlags::EYE`].
#[inline]
pub fn classify_user_planes(modelview: &Matrixx, planes: &ClipPlanes, v: &mut Vertex) {
    let eye = modelview.point3(&v.object);
    v.eye = Some(eye);
    v.flags |= VertexFlags::EYE;

    let mut clip = VertexFlags::empty();
    let mut enabled = planes.enabled();
    while enabled != 0 {
        let i = 7 - enabled.leading_zeros() as usize;
        enabled &= !(1 << i);
        if planes.equation(i).dot4(&eye) < 0 {
            clip |= VertexFlags::user_clip(i);
        }
    }
    v.flags |= clip;
}

/// User clipping, then frustum clipping and the perspective divide.
#[inline]
pub fn clip_all_perspective<const DEPTH: bool>(
    modelview: &Matrixx,
    planes: &ClipPlanes,
    vpt: &Matrixx,
    cull: &mut VertexFlags,
    v: &mut Vertex,
) {
    classify_user_planes(modelview, planes, v);
    clip_space::clip_frustum_perspective::<DEPTH>(vpt, cull, v);
}
