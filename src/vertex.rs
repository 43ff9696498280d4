//! The per-vertex record that flows through the transform-and-clip stage.

use bitflags::bitflags;

use crate::math::vec4::Vec4x;

bitflags! {
    /// Clip code and bookkeeping bits of a [`Vertex`].
    ///
    /// Frustum bits occupy the low byte, user clip planes the second byte,
    /// so the two ranges never collide.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct VertexFlags: u32 {
        /// x < -w
        const CLIP_L = 0x0001;
        /// x > w
        const CLIP_R = 0x0002;
        /// y < -w
        const CLIP_B = 0x0004;
        /// y > w
        const CLIP_T = 0x0008;
        /// z < -w
        const CLIP_N = 0x0010;
        /// z > w
        const CLIP_F = 0x0020;

        /// `eye` holds valid eye-space coordinates.
        const EYE = 0x0040;

        const USER_CLIP_0 = 0x0100;
        const USER_CLIP_1 = 0x0200;
        const USER_CLIP_2 = 0x0400;
        const USER_CLIP_3 = 0x0800;
        const USER_CLIP_4 = 0x1000;
        const USER_CLIP_5 = 0x2000;

        const FRUSTUM_CLIP_ALL = 0x003F;
        const USER_CLIP_ALL = 0x3F00;
        const CLIP_ALL = 0x3F3F;
    }
}

impl VertexFlags {
    /// The user clip bit for plane `index` (0..=5).
    #[inline]
    pub fn user_clip(index: usize) -> Self {
        debug_assert!(index < 6);
        Self::from_bits_truncate(Self::USER_CLIP_0.bits() << index)
    }

    /// Only the clip bits (frustum and user).
    #[inline]
    pub fn clip_code(self) -> Self {
        self & Self::CLIP_ALL
    }
}

/// One vertex, owned by the primitive assembler and reused across primitives.
///
/// Coordinates are 16.16 fixed point except `window`, where `x`/`y` are in
/// the rasterizer's 28.4 format and `w` holds `1/clip.w` with 28 fractional
/// bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertex {
    /// Object-space position (input).
    pub object: Vec4x,
    /// Eye-space position, present only after user clipping ran.
    pub eye: Option<Vec4x>,
    /// Clip-space position (input).
    pub clip: Vec4x,
    /// Window-space position (output).
    pub window: Vec4x,
    pub flags: VertexFlags,
}

impl Vertex {
    pub fn new(object: Vec4x, clip: Vec4x) -> Self {
        Self {
            object,
            clip,
            ..Self::default()
        }
    }

    /// A vertex with only clip coordinates, for paths that never look at `object`.
    pub fn from_clip(clip: Vec4x) -> Self {
        Self::new(Vec4x::ZERO, clip)
    }

    #[inline]
    pub fn clip_code(&self) -> VertexFlags {
        self.flags.clip_code()
    }

    /// True when any clip bit is set; `window` is then not trustworthy.
    #[inline]
    pub fn is_clipped(&self) -> bool {
        !self.clip_code().is_empty()
    }

    #[inline]
    pub fn has_eye(&self) -> bool {
        self.flags.contains(VertexFlags::EYE)
    }

    /// Clears outputs so the record can take the next vertex.
    pub fn reset(&mut self) {
        self.flags = VertexFlags::empty();
        self.eye = None;
        self.window = Vec4x::ZERO;
    }
}
