//! Current vertex attributes and face-culling state.

use crate::math::fixed::{self, clamp_x, Fixed, FIXED_ONE};
use crate::math::Vec4x;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullFace {
    Front,
    #[default]
    Back,
    FrontAndBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontFace {
    Cw,
    #[default]
    Ccw,
}

/// Face-culling configuration. Culling starts disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CullState {
    pub enabled: bool,
    pub cull_face: CullFace,
    pub front_face: FrontFace,
}

/// RGBA color in 16.16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: Fixed,
    pub g: Fixed,
    pub b: Fixed,
    pub a: Fixed,
}

impl Color {
    pub const WHITE: Self = Self {
        r: FIXED_ONE,
        g: FIXED_ONE,
        b: FIXED_ONE,
        a: FIXED_ONE,
    };

    fn clamped(self) -> Self {
        Self {
            r: clamp_x(self.r),
            g: clamp_x(self.g),
            b: clamp_x(self.b),
            a: clamp_x(self.a),
        }
    }
}

/// Attribute values applied to vertices that do not supply their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentState {
    color: Color,
    color_clamped: Color,
    normal: Vec4x,
    pub cull: CullState,
}

impl Default for CurrentState {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            color_clamped: Color::WHITE,
            normal: Vec4x::new(0, 0, FIXED_ONE, 0),
            cull: CullState::default(),
        }
    }
}

impl CurrentState {
    pub fn color4x(&mut self, r: Fixed, g: Fixed, b: Fixed, a: Fixed) {
        self.color = Color { r, g, b, a };
        self.color_clamped = self.color.clamped();
    }

    pub fn color4f(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color4x(
            fixed::from_f32(r),
            fixed::from_f32(g),
            fixed::from_f32(b),
            fixed::from_f32(a),
        );
    }

    /// The color as set, possibly outside `[0, 1]` (used by lighting).
    pub fn color(&self) -> Color {
        self.color
    }

    /// The color clamped to `[0, 1]` (used when lighting is off).
    pub fn color_clamped(&self) -> Color {
        self.color_clamped
    }

    pub fn normal3x(&mut self, x: Fixed, y: Fixed, z: Fixed) {
        self.normal = Vec4x::new(x, y, z, 0);
    }

    pub fn normal3f(&mut self, x: f32, y: f32, z: f32) {
        self.normal3x(fixed::from_f32(x), fixed::from_f32(y), fixed::from_f32(z));
    }

    pub fn normal(&self) -> Vec4x {
        self.normal
    }
}
