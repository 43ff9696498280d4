//! Vertex pipeline specializations and their selection.
//!
//! Each [`PipelineKind`] resolves to a plain function with the feature
//! choices baked in. The context resolves it once, whenever a relevant
//! feature changes, and calls the stored handle for every vertex.

use std::fmt;

use crate::clipper;
use crate::context::Context;
use crate::projection;
use crate::vertex::{Vertex, VertexFlags};

/// A resolved per-vertex entry point.
pub type VertexProcessor = fn(&mut Context, &mut Vertex);

/// Feature state the selector reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub depth_test: bool,
    /// At least one user clip plane is enabled.
    pub user_clip: bool,
    /// Geometry arrives already in window space with `w = 1`.
    pub prescaled_2d: bool,
}

/// The available vertex pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    /// Perspective divide only; clipping already resolved.
    Project,
    /// Pre-transformed 2D content, never clipped.
    Perspective2D,
    /// Frustum clip, depth written.
    Perspective3DZ,
    /// Frustum clip, no depth.
    Perspective3D,
    /// User and frustum clip, depth written.
    ClipAllPerspective3DZ,
    /// User and frustum clip, no depth.
    ClipAllPerspective3D,
}

impl PipelineKind {
    /// Picks the pipeline for a feature set. [`PipelineKind::Project`] is never
    /// selected; it is called explicitly for reprojection.
    pub fn select(features: Features) -> Self {
        if features.prescaled_2d {
            return Self::Perspective2D;
        }
        match (features.user_clip, features.depth_test) {
            (true, true) => Self::ClipAllPerspective3DZ,
            (true, false) => Self::ClipAllPerspective3D,
            (false, true) => Self::Perspective3DZ,
            (false, false) => Self::Perspective3D,
        }
    }

    pub fn processor(self) -> VertexProcessor {
        match self {
            Self::Project => project,
            Self::Perspective2D => perspective_2d,
            Self::Perspective3DZ => perspective_3d_z,
            Self::Perspective3D => perspective_3d,
            Self::ClipAllPerspective3DZ => clip_all_perspective_3d_z,
            Self::ClipAllPerspective3D => clip_all_perspective_3d,
        }
    }
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Project => "project",
            Self::Perspective2D => "perspective-2d",
            Self::Perspective3DZ => "perspective-3d-z",
            Self::Perspective3D => "perspective-3d",
            Self::ClipAllPerspective3DZ => "clip-all-perspective-3d-z",
            Self::ClipAllPerspective3D => "clip-all-perspective-3d",
        };
        f.write_str(name)
    }
}

/// A pipeline kind bound to its resolved entry point.
#[derive(Clone, Copy)]
pub struct Pipeline {
    kind: PipelineKind,
    process: VertexProcessor,
}

impl Pipeline {
    pub fn bind(kind: PipelineKind) -> Self {
        Self {
            kind,
            process: kind.processor(),
        }
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    #[inline]
    pub fn processor(&self) -> VertexProcessor {
        self.process
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("kind", &self.kind).finish()
    }
}

// ============ Entry points ============

/// Perspective divide only. Depth follows the context's depth-test state.
pub fn project(c: &mut Context, v: &mut Vertex) {
    let vpt = c.transforms.viewport_transform();
    if c.features().depth_test {
        projection::perspective::<true>(vpt, v);
    } else {
        projection::perspective::<false>(vpt, v);
    }
}

/// 2D fast path. Also marks the primitive as needing no clipping.
pub fn perspective_2d(c: &mut Context, v: &mut Vertex) {
    c.cull = VertexFlags::empty();
    projection::perspective_2d(v);
}

pub fn perspective_3d_z(c: &mut Context, v: &mut Vertex) {
    clipper::clip_frustum_perspective::<true>(c.transforms.viewport_transform(), &mut c.cull, v);
}

pub fn perspective_3d(c: &mut Context, v: &mut Vertex) {
    clipper::clip_frustum_perspective::<false>(c.transforms.viewport_transform(), &mut c.cull, v);
}

pub fn clip_all_perspective_3d_z(c: &mut Context, v: &mut Vertex) {
    clipper::clip_all_perspective::<true>(
        c.transforms.modelview_transform(),
        &c.clip_planes,
        c.transforms.viewport_transform(),
        &mut c.cull,
        v,
    );
}

pub fn clip_all_perspective_3d(c: &mut Context, v: &mut Vertex) {
    clipper::clip_all_perspective::<false>(
        c.transforms.modelview_transform(),
        &c.clip_planes,
        c.transforms.viewport_transform(),
        &mut c.cull,
        v,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::fixed::{from_int, FIXED_ONE};
    use crate::math::Vec4x;

    #[test]
    fn selection_table() {
        let f = |depth_test, user_clip, prescaled_2d| Features {
            depth_test,
            user_clip,
            prescaled_2d,
        };
        assert_eq!(PipelineKind::select(f(false, false, false)), PipelineKind::Perspective3D);
        assert_eq!(PipelineKind::select(f(true, false, false)), PipelineKind::Perspective3DZ);
        assert_eq!(PipelineKind::select(f(false, true, false)), PipelineKind::ClipAllPerspective3D);
        assert_eq!(PipelineKind::select(f(true, true, false)), PipelineKind::ClipAllPerspective3DZ);
        assert_eq!(PipelineKind::select(f(true, true, true)), PipelineKind::Perspective2D);
    }

    #[test]
    fn bound_pipeline_remembers_kind() {
        let p = Pipeline::bind(PipelineKind::ClipAllPerspective3D);
        assert_eq!(p.kind(), PipelineKind::ClipAllPerspective3D);
        assert_eq!(format!("{}", p.kind()), "clip-all-perspective-3d");
    }

    #[test]
    fn depth_specializations_differ_only_in_z() {
        let mut c = Context::new(64, 64);
        let clip = Vec4x::new(0, 0, FIXED_ONE / 2, FIXED_ONE);

        let mut with_z = Vertex::from_clip(clip);
        perspective_3d_z(&mut c, &mut with_z);
        let mut without_z = Vertex::from_clip(clip);
        perspective_3d(&mut c, &mut without_z);

        assert_eq!(with_z.window.x, without_z.window.x);
        assert_eq!(with_z.window.y, without_z.window.y);
        assert_eq!(with_z.window.w, without_z.window.w);
        assert_eq!(with_z.window.z, FIXED_ONE * 3 / 4);
        assert_eq!(without_z.window.z, 0);
    }

    #[test]
    fn clip_all_without_enabled_planes_matches_frustum_path() {
        let mut c = Context::new(64, 64);
        let object = Vec4x::point(from_int(-1), 0, 0);
        let clip = Vec4x::new(from_int(-1), 0, 0, from_int(2));

        let mut a = Vertex::new(object, clip);
        clip_all_perspective_3d_z(&mut c, &mut a);
        let mut b = Vertex::new(object, clip);
        perspective_3d_z(&mut c, &mut b);

        assert_eq!(a.window, b.window);
        assert!(a.has_eye());
        assert!(!b.has_eye());
        assert!(b.eye.is_none());
    }
}
