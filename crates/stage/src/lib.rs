//! Stage: the single owner of mutable viewer state.
//!
//! # Invariants
//! - Every selection is followed, in the same call, by camera alignment on the
//!   selected cake.
//! - Camera controls never touch the scene.

mod stage;

pub use stage::Stage;
