//! User clip-plane registry.
//!
//! Equations are stored in eye space: they are transformed by the model-view
//! inverse-transpose once, when set, so the per-vertex test is a plain dot
//! product.

use crate::error::GlError;
use crate::math::{Matrixx, Vec4x};

/// Number of user clip planes.
pub const MAX_CLIP_PLANES: usize = 6;

pub const GL_CLIP_PLANE0: u32 = 0x3000;
pub const GL_CLIP_PLANE5: u32 = GL_CLIP_PLANE0 + MAX_CLIP_PLANES as u32 - 1;

/// Maps `GL_CLIP_PLANEi` to `i`, or `None` when out of range.
#[inline]
pub fn plane_index(plane: u32) -> Option<usize> {
    let p = plane.wrapping_sub(GL_CLIP_PLANE0) as usize;
    (p < MAX_CLIP_PLANES).then_some(p)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipPlanes {
    equations: [Vec4x; MAX_CLIP_PLANES],
    enabled: u8,
}

impl ClipPlanes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the object-space `equation` for plane `index`, transformed by `mvit`.
    ///
    /// An out-of-range index leaves every plane untouched.
    pub fn set(&mut self, index: usize, equation: Vec4x, mvit: &Matrixx) -> Result<(), GlError> {
        let slot = self
            .equations
            .get_mut(index)
            .ok_or(GlError::InvalidEnum(GL_CLIP_PLANE0.wrapping_add(index as u32)))?;
        *slot = mvit.point4(&equation);
        Ok(())
    }

    /// Eye-space equation of plane `index`.
    #[inline]
    pub fn equation(&self, index: usize) -> Vec4x {
        self.equations[index]
    }

    /// Bitmask of enabled planes, bit `i` for plane `i`.
    #[inline]
    pub fn enabled(&self) -> u8 {
        self.enabled
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        index < MAX_CLIP_PLANES && self.enabled & (1 << index) != 0
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled != 0
    }

    pub fn set_enabled(&mut self, index: usize, enable: bool) {
        debug_assert!(index < MAX_CLIP_PLANES);
        if enable {
            self.enabled |= 1 << index;
        } else {
            self.enabled &= !(1 << index);
        }
    }
}
