//! WebGPU rendering module
//!
//! Scenes are tessellated on the CPU into colored triangles in canvas
//! pixels; the pipeline maps them to NDC and draws them in one pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
