//! Per-vertex clip classification.
//!
//! - [`clip_space`]: the six canonical frustum planes, tested in clip space.
//! - [`user`]: up to six user planes, tested in eye space before the frustum.
//!
//! Both only produce clip codes; primitives crossing a plane are left to a
//! tessellating clipper further down the line.

pub mod clip_space;
pub mod user;

pub use clip_space::{clip_frustum_perspective, frustum_code, ClipPlane};
pub use user::{classify_user_planes, clip_all_perspective};
