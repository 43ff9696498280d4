//! Floating-point and fixed-point math used by the vertex stage.

pub mod fixed;
pub mod mat4;
pub mod matrixx;
pub mod vec4;

pub use fixed::Fixed;
pub use mat4::Mat4;
pub use matrixx::Matrixx;
pub use vec4::Vec4x;
