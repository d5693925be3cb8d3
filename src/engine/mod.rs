// Engine module - geometry core plus the viewer plumbing around it.
// The geometry modules (curve, path, tessellate, mesh, shape_state) have no
// GPU dependency beyond vertex layouts and are tested in isolation.

pub mod camera;
pub mod config;
pub mod curve;
pub mod debug_overlay;
pub mod error;
pub mod input;
pub mod mesh;
pub mod path;
pub mod shape_state;
pub mod tessellate;

// Re-export commonly used items
pub use curve::chaikin;
pub use error::{GeometryError, GeometryResult};
pub use mesh::{GpuVertex, LineVertex, Mesh};
pub use path::PathSampler;
pub use shape_state::{ShadingMode, ShapeState, WireframeLevel};
pub use tessellate::{BaseShape, Tessellator};
