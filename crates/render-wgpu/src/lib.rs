//! wgpu render backend for the cake scene.
//!
//! Draws every cake as an instance of one shared cylinder mesh, each with its
//! own texture. Shading is unlit: the texture colour is the final colour.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - Textures are uploaded once; per frame only the camera uniform and the
//!   instance transforms are written.

mod gpu;
mod shaders;
mod texture;

pub use gpu::WgpuRenderer;
