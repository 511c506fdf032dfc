use cakestand_common::CakeId;
use glam::Vec2;

/// A high-level action produced from pointer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Primary click at a window position in physical pixels. Resolved to
    /// `Select` or `Noop` by picking.
    Click(Vec2),
    /// Select a cake.
    Select(CakeId),
    /// Orbit the camera around its target by a pixel delta.
    Orbit(Vec2),
    /// Pan the camera in the view plane by a pixel delta.
    Pan(Vec2),
    /// Zoom by wheel steps; positive zooms in.
    Zoom(f32),
    /// Nothing to do.
    Noop,
}

impl Action {
    /// Whether this action moves the camera directly.
    pub fn is_camera_control(&self) -> bool {
        matches!(self, Self::Orbit(_) | Self::Pan(_) | Self::Zoom(_))
    }
}
