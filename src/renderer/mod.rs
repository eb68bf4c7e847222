//! WebGPU rendering module
//!
//! Draws a `RenderSnapshot` as flat colored quads.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
