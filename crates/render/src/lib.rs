//! Rendering adapter: everything a backend needs that does not touch a GPU.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - Render state derives from the scene and the camera only.

mod camera;
mod label;
mod mesh;
mod renderer;

pub use camera::{FOCUS_OFFSET, FOCUS_UP, OrbitCamera};
pub use label::{LabelLayout, layout_label};
pub use mesh::{MAX_SEGMENTS, Mesh, MeshVertex, cake_mesh, cylinder_mesh};
pub use renderer::{DebugTextRenderer, Renderer};
