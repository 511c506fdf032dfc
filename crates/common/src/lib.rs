//! Shared value types used across the cakestand crates.

mod types;

pub use types::{CakeId, ColorParseError, Rgba};

/// Cake cylinder radius (top and bottom) before scaling.
pub const CAKE_RADIUS: f32 = 1.0;
/// Cake cylinder height before scaling.
pub const CAKE_HEIGHT: f32 = 2.0;
/// Radial segments used to tessellate the cake cylinder.
pub const CAKE_SEGMENTS: u32 = 32;
