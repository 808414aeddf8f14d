//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into a flat-colored triangle list.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, scene_to_ndc};
pub use shapes::scene;
pub use vertex::{Palette, Vertex};
