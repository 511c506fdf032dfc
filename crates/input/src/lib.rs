//! Input: raw pointer events become `Action`s; clicks are resolved to cakes by
//! ray picking.
//!
//! # Invariants
//! - Consumers see actions, never raw window events.
//! - A press that travels further than `CLICK_SLOP_PX` is a drag, never a click.

pub mod action;
pub mod pick;
pub mod pointer;

pub use action::Action;
pub use pick::{Cylinder, Ray, pick, ray_cylinder};
pub use pointer::{CLICK_SLOP_PX, PointerButton, PointerTracker};
