//! Fixed-point vertex transform-and-clip stage of a software GL pipeline.
//!
//! Takes vertices whose clip-space position is already known, classifies
//! them against the view frustum and up to six user clip planes, and maps
//! accepted vertices to window space. A per-primitive cull accumulator makes
//! trivial rejection of whole primitives possible.
//!
//! # Quick Start
//!
//! ```ignore
//! use agl_vertex::prelude::*;
//!
//! let mut ctx = Context::new(640, 480);
//! ctx.enable(GL_DEPTH_TEST);
//! let mut tri = [Vertex::from_clip(a), Vertex::from_clip(b), Vertex::from_clip(c)];
//! if !ctx.process_primitive(&mut tri) {
//!     // rasterize using tri[i].window
//! }
//! ```

// Public API - exposed to library consumers
pub mod clip_planes;
pub mod clipper;
pub mod context;
pub mod current;
pub mod error;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod transform;
pub mod vertex;

// Re-export commonly needed types at crate root for convenience
pub use context::Context;
pub use error::GlError;
pub use pipeline::{PipelineKind, VertexProcessor};
pub use vertex::{Vertex, VertexFlags};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use agl_vertex::prelude::*;
/// ```
pub mod prelude {
    // Context & state
    pub use crate::clip_planes::{GL_CLIP_PLANE0, GL_CLIP_PLANE5, MAX_CLIP_PLANES};
    pub use crate::context::{Context, GL_CULL_FACE, GL_DEPTH_TEST};
    pub use crate::error::{GlError, GL_INVALID_ENUM, GL_INVALID_VALUE, GL_NO_ERROR};

    // Pipeline
    pub use crate::pipeline::{Features, PipelineKind};

    // Vertex
    pub use crate::vertex::{Vertex, VertexFlags};

    // Math
    pub use crate::math::fixed::{Fixed, FIXED_ONE};
    pub use crate::math::{Mat4, Matrixx, Vec4x};
}
