//! Scene state: the fixed cake catalog, the current selection, and the
//! per-cake scale that follows it.
//!
//! # Invariants
//! - The cake list is built once from a catalog and never grows or shrinks.
//! - At most one cake carries `ENLARGED_SCALE`, and it is exactly the selected cake.
//! - Selection is only ever replaced, never cleared.

pub mod catalog;
pub mod scene;

pub use catalog::{CakeSpec, Catalog, CatalogError};
pub use scene::{
    BASE_SCALE, Cake, ENLARGED_SCALE, LABEL_ANCHOR, LABEL_FONT_SIZE, Label, Scene, SceneError,
    SceneEvent, SelectionChange,
};
