//! Rendering context state consumed by the vertex stage.
//!
//! The [`Context`] is passed explicitly to every vertex entry point. It owns
//! the transform registry, the user clip planes, the per-primitive cull
//! accumulator and the currently bound vertex pipeline, and it reports
//! errors GL style: the first error is kept until [`Context::get_error`]
//! reads it.

use log::{debug, warn};

use crate::clip_planes::{self, ClipPlanes};
use crate::current::CurrentState;
use crate::error::{GlError, GL_NO_ERROR};
use crate::math::fixed::Fixed;
use crate::math::{Mat4, Vec4x};
use crate::pipeline::{self, Features, Pipeline, PipelineKind};
use crate::transform::TransformState;
use crate::vertex::{Vertex, VertexFlags};

pub const GL_DEPTH_TEST: u32 = 0x0B71;
pub const GL_CULL_FACE: u32 = 0x0B44;

pub struct Context {
    pub(crate) transforms: TransformState,
    pub(crate) clip_planes: ClipPlanes,
    /// AND of the clip codes of the current primitive's vertices.
    pub(crate) cull: VertexFlags,
    depth_test: bool,
    prescaled_2d: bool,
    current: CurrentState,
    error: Option<GlError>,
    pipeline: Pipeline,
}

impl Context {
    /// A context with identity transforms and a `width` x `height` viewport.
    ///
    /// A negative size leaves an empty viewport and records `GL_INVALID_VALUE`,
    /// as `set_viewport` would.
    pub fn new(width: i32, height: i32) -> Self {
        let features = Features::default();
        let mut ctx = Self {
            transforms: TransformState::new(0, 0),
            clip_planes: ClipPlanes::new(),
            cull: VertexFlags::CLIP_ALL,
            depth_test: features.depth_test,
            prescaled_2d: features.prescaled_2d,
            current: CurrentState::default(),
            error: None,
            pipeline: Pipeline::bind(PipelineKind::select(features)),
        };
        ctx.set_viewport(0, 0, width, height);
        ctx
    }

    // ============ Accessors ============

    pub fn transforms(&self) -> &TransformState {
        &self.transforms
    }

    pub fn clip_planes(&self) -> &ClipPlanes {
        &self.clip_planes
    }

    pub fn current(&self) -> &CurrentState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut CurrentState {
        &mut self.current
    }

    pub fn features(&self) -> Features {
        Features {
            depth_test: self.depth_test,
            user_clip: self.clip_planes.any_enabled(),
            prescaled_2d: self.prescaled_2d,
        }
    }

    pub fn pipeline(&self) -> PipelineKind {
        self.pipeline.kind()
    }

    // ============ Errors ============

    /// Returns the pending error code and clears it.
    pub fn get_error(&mut self) -> u32 {
        self.error.take().map_or(GL_NO_ERROR, |e| e.code())
    }

    fn record_error(&mut self, err: GlError) {
        warn!("{err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    // ============ Feature state ============

    pub fn enable(&mut self, cap: u32) {
        self.set_capability(cap, true);
    }

    pub fn disable(&mut self, cap: u32) {
        self.set_capability(cap, false);
    }

    pub fn is_enabled(&self, cap: u32) -> bool {
        match cap {
            GL_DEPTH_TEST => self.depth_test,
            GL_CULL_FACE => self.current.cull.enabled,
            _ => clip_planes::plane_index(cap).is_some_and(|i| self.clip_planes.is_enabled(i)),
        }
    }

    fn set_capability(&mut self, cap: u32, on: bool) {
        match cap {
            GL_DEPTH_TEST => self.depth_test = on,
            GL_CULL_FACE => {
                self.current.cull.enabled = on;
                return;
            }
            _ => match clip_planes::plane_index(cap) {
                Some(i) => self.clip_planes.set_enabled(i, on),
                None => {
                    self.record_error(GlError::InvalidEnum(cap));
                    return;
                }
            },
        }
        self.rebind_pipeline();
    }

    /// Marks incoming geometry as already in window space with `w = 1`.
    pub fn set_prescaled_2d(&mut self, on: bool) {
        self.prescaled_2d = on;
        self.rebind_pipeline();
    }

    fn rebind_pipeline(&mut self) {
        let kind = PipelineKind::select(self.features());
        if kind != self.pipeline.kind() {
            debug!("vertex pipeline {} -> {}", self.pipeline.kind(), kind);
            self.pipeline = Pipeline::bind(kind);
        }
    }

    // ============ Transforms ============

    pub fn set_modelview(&mut self, modelview: Mat4) {
        self.transforms.set_modelview(modelview);
    }

    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if let Err(err) = self.transforms.set_viewport(x, y, width, height) {
            self.record_error(err);
        }
    }

    pub fn set_depth_range(&mut self, z_near: f32, z_far: f32) {
        self.transforms.set_depth_range(z_near, z_far);
    }

    // ============ Clip planes ============

    /// Sets `GL_CLIP_PLANEi` from an object-space equation.
    ///
    /// The equation is moved to eye space with the current model-view
    /// inverse-transpose. Unknown planes leave all state unchanged.
    pub fn try_clip_plane(&mut self, plane: u32, equation: Vec4x) -> Result<(), GlError> {
        let index = clip_planes::plane_index(plane).ok_or(GlError::InvalidEnum(plane))?;
        self.clip_planes
            .set(index, equation, self.transforms.validate_mvit())
    }

    pub fn clip_planex(&mut self, plane: u32, equation: &[Fixed; 4]) {
        if let Err(err) = self.try_clip_plane(plane, Vec4x::from(*equation)) {
            self.record_error(err);
        }
    }

    pub fn clip_planef(&mut self, plane: u32, equation: &[f32; 4]) {
        if let Err(err) = self.try_clip_plane(plane, Vec4x::from_f32(*equation)) {
            self.record_error(err);
        }
    }

    // ============ Primitive bookkeeping ============

    /// Starts a new primitive: every plane is assumed failed until a vertex
    /// says otherwise.
    pub fn begin_primitive(&mut self) {
        self.cull = VertexFlags::CLIP_ALL;
    }

    /// The cull accumulator of the current primitive.
    pub fn cull(&self) -> VertexFlags {
        self.cull
    }

    /// All vertices so far lie outside a common plane.
    pub fn is_trivially_rejected(&self) -> bool {
        !self.cull.is_empty()
    }

    // ============ Vertex processing ============

    /// Runs the bound pipeline on one vertex.
    #[inline]
    pub fn process_vertex(&mut self, v: &mut Vertex) {
        let process = self.pipeline.processor();
        process(self, v);
    }

    /// Perspective divide only, for vertices whose clipping is already settled.
    pub fn project_vertex(&mut self, v: &mut Vertex) {
        pipeline::project(self, v);
    }

    /// Processes all vertices of one primitive and returns `true` if it can
    /// be trivially rejected.
    pub fn process_primitive(&mut self, vertices: &mut [Vertex]) -> bool {
        self.begin_primitive();
        for v in vertices.iter_mut() {
            self.process_vertex(v);
        }
        self.is_trivially_rejected()
    }
}
