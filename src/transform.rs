//! Transform registry for the vertex stage.
//!
//! Holds the viewport transform, the model-view transform and the model-view
//! inverse-transpose (MVIT). Float matrices are the source of truth; each has
//! a fixed-point copy for the per-vertex path. The MVIT is only rebuilt when
//! something asks for it after the model-view changed.

use log::{debug, warn};

use crate::error::GlError;
use crate::math::{Mat4, Matrixx};

/// Viewport rectangle and depth range, as set by the GL calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Viewport {
    /// The viewport transform as a diagonal-plus-offset matrix.
    ///
    /// ```text
    /// m[0]  = w/2        m[12] = x + w/2
    /// m[5]  = h/2        m[13] = y + h/2
    /// m[10] = (f - n)/2  m[14] = (f + n)/2
    /// ```
    pub fn matrix(&self) -> Mat4 {
        let hw = self.width as f32 * 0.5;
        let hh = self.height as f32 * 0.5;
        let mut m = Mat4::scaling(hw, hh, (self.z_far - self.z_near) * 0.5);
        m.set(12, self.x as f32 + hw);
        m.set(13, self.y as f32 + hh);
        m.set(14, (self.z_far + self.z_near) * 0.5);
        m
    }
}

#[derive(Clone, Debug)]
pub struct TransformState {
    viewport: Viewport,
    vpt: Matrixx,
    modelview: Mat4,
    modelview_x: Matrixx,
    mvit: Matrixx,
    mvit_dirty: bool,
}

impl TransformState {
    /// Identity model-view and a viewport covering `width` x `height`.
    /// Negative sizes are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let viewport = Viewport {
            x: 0,
            y: 0,
            width: width.max(0),
            height: height.max(0),
            z_near: 0.0,
            z_far: 1.0,
        };
        Self {
            viewport,
            vpt: Matrixx::from(&viewport.matrix()),
            modelview: Mat4::identity(),
            modelview_x: Matrixx::identity(),
            mvit: Matrixx::identity(),
            mvit_dirty: false,
        }
    }

    // ============ Viewport ============

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The fixed-point viewport transform read by the perspective projector.
    #[inline]
    pub fn viewport_transform(&self) -> &Matrixx {
        &self.vpt
    }

    /// Negative sizes are rejected and leave the viewport untouched.
    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), GlError> {
        if width < 0 || height < 0 {
            return Err(GlError::InvalidValue("negative viewport size"));
        }
        self.viewport.x = x;
        self.viewport.y = y;
        self.viewport.width = width;
        self.viewport.height = height;
        self.rebuild_viewport();
        Ok(())
    }

    /// Depth range, clamped to `[0, 1]`.
    pub fn set_depth_range(&mut self, z_near: f32, z_far: f32) {
        self.viewport.z_near = z_near.clamp(0.0, 1.0);
        self.viewport.z_far = z_far.clamp(0.0, 1.0);
        self.rebuild_viewport();
    }

    fn rebuild_viewport(&mut self) {
        self.vpt = Matrixx::from(&self.viewport.matrix());
    }

    // ============ Model-view ============

    pub fn modelview(&self) -> &Mat4 {
        &self.modelview
    }

    /// The fixed-point model-view used to compute eye coordinates.
    #[inline]
    pub fn modelview_transform(&self) -> &Matrixx {
        &self.modelview_x
    }

    /// Replaces the model-view. The MVIT becomes stale.
    pub fn set_modelview(&mut self, modelview: Mat4) {
        self.modelview = modelview;
        self.modelview_x = Matrixx::from(&modelview);
        self.mvit_dirty = true;
    }

    pub fn is_mvit_valid(&self) -> bool {
        !self.mvit_dirty
    }

    /// Returns the MVIT, recomputing it first if the model-view changed.
    ///
    /// A singular model-view has no inverse; identity is used in its place.
    pub fn validate_mvit(&mut self) -> &Matrixx {
        if self.mvit_dirty {
            let inverse = self.modelview.inverse().unwrap_or_else(|| {
                warn!("singular model-view matrix, using identity for its inverse-transpose");
                Mat4::identity()
            });
            self.mvit = Matrixx::from(&inverse.transpose());
            self.mvit_dirty = false;
            debug!("model-view inverse-transpose revalidated");
        }
        &self.mvit
    }
}
