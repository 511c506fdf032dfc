use crate::camera::OrbitCamera;
use cakestand_scene::Scene;
use std::fmt::Write;

/// Renderer-agnostic interface.
///
/// A renderer reads the scene and a camera and produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene as seen from `camera`.
    fn render(&self, scene: &Scene, camera: &OrbitCamera) -> Self::Output;
}

/// Describes a frame as text: cakes, scales, selection, label, camera.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &OrbitCamera) -> String {
        let mut out = String::new();
        let selected = scene
            .selected_cake()
            .map(|c| format!("{} {}", c.id, c.name))
            .unwrap_or_else(|| "none".into());
        let _ = writeln!(
            out,
            "=== Scene ({} cakes, selected={selected}) ===",
            scene.cakes().len()
        );
        let (e, t) = (camera.position, camera.target);
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            e.x,
            e.y,
            e.z,
            t.x,
            t.y,
            t.z,
            camera.fov.to_degrees()
        );

        for cake in scene.cakes() {
            let marker = if scene.selected() == Some(cake.id) {
                '*'
            } else {
                ' '
            };
            let p = cake.position;
            let _ = writeln!(
                out,
                "{marker} [{}] {:<16} pos=({:.2}, {:.2}, {:.2}) scale={:.2} color={} image={}",
                cake.id,
                cake.name,
                p.x,
                p.y,
                p.z,
                cake.scale,
                cake.color.to_hex(),
                cake.image.display()
            );
        }

        if let Some(label) = scene.label() {
            let a = label.anchor;
            let _ = writeln!(
                out,
                "Label: {:?} at ({:.1}, {:.1}, {:.1})",
                label.text, a.x, a.y, a.z
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cakestand_common::CakeId;

    #[test]
    fn unselected_scene_has_no_label() {
        let scene = Scene::default();
        let output = DebugTextRenderer::new().render(&scene, &OrbitCamera::default());
        assert!(output.contains("4 cakes, selected=none"));
        assert!(output.contains("Chocolate Cake"));
        assert!(!output.contains("Label:"));
        assert!(!output.contains("scale=1.50"));
    }

    #[test]
    fn selected_scene_marks_cake_and_label() {
        let mut scene = Scene::default();
        scene.select(CakeId(2)).unwrap();
        let output = DebugTextRenderer::new().render(&scene, &OrbitCamera::default());
        assert!(output.contains("selected=#2 Vanilla Cake"));
        assert!(output.contains("* [#2] Vanilla Cake"));
        assert!(output.contains("Label: \"Vanilla Cake\" at (0.0, 2.0, 0.0)"));
        assert_eq!(output.matches("scale=1.50").count(), 1);
    }

    #[test]
    fn camera_line_reports_eye_and_target() {
        let scene = Scene::default();
        let output = DebugTextRenderer::new().render(&scene, &OrbitCamera::default());
        assert!(output.contains("eye=(0.0, 0.0, 5.0) target=(0.0, 0.0, 0.0) fov=75"));
    }
}
