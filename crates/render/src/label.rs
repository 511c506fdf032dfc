use crate::camera::OrbitCamera;
use cakestand_scene::Label;
use glam::Vec2;

/// Where and how large to draw a label on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Centre of the text in window pixels.
    pub center: Vec2,
    /// Glyph height in window pixels.
    pub font_px: f32,
}

/// Project a world-space label into window pixels.
///
/// The world font size is scaled by the perspective at the anchor's view
/// depth, so the label shrinks as the camera moves away. Returns `None` when
/// the anchor is off screen or behind the camera.
pub fn layout_label(label: &Label, camera: &OrbitCamera, viewport: Vec2) -> Option<LabelLayout> {
    let center = camera.project(label.anchor, viewport)?;
    let depth = (label.anchor - camera.position).dot(camera.forward());
    if depth <= camera.near {
        return None;
    }
    let world_to_px = viewport.y / (2.0 * depth * (camera.fov * 0.5).tan());
    Some(LabelLayout {
        center,
        font_px: label.font_size * world_to_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cakestand_common::Rgba;
    use cakestand_scene::{LABEL_ANCHOR, LABEL_FONT_SIZE};
    use glam::Vec3;

    fn label() -> Label {
        Label {
            text: "Vanilla Cake".into(),
            anchor: LABEL_ANCHOR,
            font_size: LABEL_FONT_SIZE,
            color: Rgba::BLACK,
        }
    }

    #[test]
    fn label_above_centre_from_default_camera() {
        let cam = OrbitCamera::default();
        let layout = layout_label(&label(), &cam, Vec2::new(800.0, 600.0)).unwrap();
        assert!((layout.center.x - 400.0).abs() < 1e-2);
        assert!(layout.center.y < 300.0);
        // 0.5 * 600 / (2 * 5 * tan(37.5deg))
        assert!((layout.font_px - 39.1).abs() < 0.1);
    }

    #[test]
    fn label_shrinks_with_distance() {
        let viewport = Vec2::new(800.0, 600.0);
        let near = layout_label(&label(), &OrbitCamera::default(), viewport).unwrap();
        let mut cam = OrbitCamera::default();
        cam.zoom(-3.0);
        let far = layout_label(&label(), &cam, viewport).unwrap();
        assert!(far.font_px < near.font_px);
    }

    #[test]
    fn label_outside_the_frustum_is_hidden() {
        let cam = OrbitCamera::default();
        let wide = Label {
            anchor: Vec3::new(50.0, 2.0, 0.0),
            ..label()
        };
        // In front of the eye, far off to the side
        assert!((wide.anchor - cam.position).dot(cam.forward()) > cam.near);
        assert!(layout_label(&wide, &cam, Vec2::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn label_behind_camera_is_hidden() {
        let cam = OrbitCamera {
            position: Vec3::new(0.0, 2.0, -5.0),
            target: Vec3::new(0.0, 2.0, -10.0),
            ..OrbitCamera::default()
        };
        assert!(layout_label(&label(), &cam, Vec2::new(800.0, 600.0)).is_none());
    }
}
