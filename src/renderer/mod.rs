//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into vertex-colored triangles in board
//! coordinates, then mapped through a letterboxed viewport.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::build_scene;
pub use vertex::Vertex;
pub use viewport::Viewport;
