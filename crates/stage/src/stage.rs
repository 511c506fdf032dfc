use cakestand_input::{Action, Cylinder, pick};
use cakestand_render::OrbitCamera;
use cakestand_scene::{Scene, SceneError, SelectionChange};
use glam::Vec2;

/// Scene plus camera, driven by `Action`s.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    scene: Scene,
    camera: OrbitCamera,
}

impl Stage {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            camera: OrbitCamera::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Hit shapes for every cake at its current scale.
    pub fn hit_shapes(&self) -> Vec<Cylinder> {
        self.scene
            .cakes()
            .iter()
            .map(|c| Cylinder::cake(c.id, c.position, c.scale))
            .collect()
    }

    /// Resolve a click at a window pixel to `Select` or `Noop`.
    pub fn click(&self, pixel: Vec2, viewport: Vec2) -> Action {
        let ray = self.camera.screen_ray(pixel, viewport);
        match pick(&ray, &self.hit_shapes()) {
            Some(id) => Action::Select(id),
            None => Action::Noop,
        }
    }

    /// Apply one action. Returns the selection change when the action
    /// selected a cake.
    ///
    /// `Click` needs the viewport to build a ray, so it is resolved with
    /// [`Stage::apply_in_viewport`]; here it is ignored.
    pub fn apply(&mut self, action: Action) -> Result<Option<SelectionChange>, SceneError> {
        match action {
            Action::Select(id) => {
                let change = self.scene.select(id)?;
                self.align_camera();
                Ok(Some(change))
            }
            Action::Orbit(delta) => {
                self.camera.rotate(delta);
                Ok(None)
            }
            Action::Pan(delta) => {
                self.camera.pan(delta);
                Ok(None)
            }
            Action::Zoom(steps) => {
                self.camera.zoom(steps);
                Ok(None)
            }
            Action::Click(_) | Action::Noop => Ok(None),
        }
    }

    /// Apply an action, resolving clicks against the given viewport first.
    pub fn apply_in_viewport(
        &mut self,
        action: Action,
        viewport: Vec2,
    ) -> Result<Option<SelectionChange>, SceneError> {
        let action = match action {
            Action::Click(pixel) => self.click(pixel, viewport),
            other => other,
        };
        self.apply(action)
    }

    /// Point the camera at the selected cake, if any.
    fn align_camera(&mut self) {
        if let Some(cake) = self.scene.selected_cake() {
            self.camera.focus_on(cake.position);
            tracing::debug!(
                "camera focused on {} at ({:.1}, {:.1}, {:.1})",
                cake.name,
                cake.position.x,
                cake.position.y,
                cake.position.z
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cakestand_common::CakeId;
    use cakestand_scene::{BASE_SCALE, ENLARGED_SCALE};
    use glam::Vec3;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn select_enlarges_and_focuses() {
        let mut stage = Stage::default();
        let change = stage.apply(Action::Select(CakeId(1))).unwrap().unwrap();
        assert_eq!(change.current, CakeId(1));
        assert_eq!(stage.scene().cake(CakeId(1)).unwrap().scale, ENLARGED_SCALE);
        assert_eq!(stage.camera().position, Vec3::new(2.0, 5.0, 5.0));
        assert_eq!(stage.camera().target, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(stage.camera().up, Vec3::Y);
    }

    #[test]
    fn every_cake_gets_the_same_camera_offset() {
        let mut stage = Stage::default();
        let cakes: Vec<(CakeId, Vec3)> = stage
            .scene()
            .cakes()
            .iter()
            .map(|c| (c.id, c.position))
            .collect();
        for (id, p) in cakes {
            stage.apply(Action::Select(id)).unwrap();
            assert_eq!(stage.camera().position, Vec3::new(p.x, p.y + 5.0, p.z + 5.0));
            assert_eq!(stage.camera().target, p);
            assert_eq!(stage.scene().enlarged().collect::<Vec<_>>(), vec![id]);
        }
    }

    #[test]
    fn reselect_refocuses_after_orbit() {
        let mut stage = Stage::default();
        stage.apply(Action::Select(CakeId(2))).unwrap();
        stage.apply(Action::Orbit(Vec2::new(80.0, 0.0))).unwrap();
        assert_ne!(stage.camera().position, Vec3::new(-2.0, 5.0, 5.0));

        let change = stage.apply(Action::Select(CakeId(2))).unwrap().unwrap();
        assert!(change.is_reselect());
        assert_eq!(stage.camera().position, Vec3::new(-2.0, 5.0, 5.0));
        assert_eq!(stage.scene().enlarged().collect::<Vec<_>>(), vec![CakeId(2)]);
    }

    #[test]
    fn unknown_cake_keeps_camera() {
        let mut stage = Stage::default();
        stage.apply(Action::Select(CakeId(4))).unwrap();
        let before = *stage.camera();
        assert!(stage.apply(Action::Select(CakeId(42))).is_err());
        assert_eq!(*stage.camera(), before);
        assert_eq!(stage.scene().selected(), Some(CakeId(4)));
    }

    #[test]
    fn camera_controls_leave_scene_alone() {
        let mut stage = Stage::default();
        stage.apply(Action::Select(CakeId(3))).unwrap();
        stage.scene_mut().drain_events();
        for action in [
            Action::Orbit(Vec2::new(5.0, 5.0)),
            Action::Pan(Vec2::new(-5.0, 0.0)),
            Action::Zoom(2.0),
            Action::Noop,
        ] {
            assert!(stage.apply(action).unwrap().is_none());
        }
        assert!(stage.scene().events().is_empty());
        assert_eq!(stage.scene().selected(), Some(CakeId(3)));
    }

    #[test]
    fn click_on_cake_selects_it() {
        let mut stage = Stage::default();
        // Default eye at (0, 0, 5) looks straight at the strawberry cake at (0, 0, 2)
        let centre = VIEWPORT * 0.5;
        let change = stage
            .apply_in_viewport(Action::Click(centre), VIEWPORT)
            .unwrap()
            .unwrap();
        assert_eq!(change.current, CakeId(3));
        assert_eq!(stage.camera().target, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn click_on_projected_cake_selects_it() {
        let stage = Stage::default();
        let chocolate = stage
            .camera()
            .project(Vec3::new(2.0, 0.0, 0.0), VIEWPORT)
            .unwrap();
        assert_eq!(stage.click(chocolate, VIEWPORT), Action::Select(CakeId(1)));
    }

    #[test]
    fn unresolved_click_is_ignored_by_apply() {
        let mut stage = Stage::default();
        let before = *stage.camera();
        // Centre of the screen is over a cake, but apply has no viewport
        let result = stage.apply(Action::Click(VIEWPORT * 0.5)).unwrap();
        assert!(result.is_none());
        assert!(stage.scene().selected().is_none());
        assert!(stage.scene().events().is_empty());
        assert_eq!(*stage.camera(), before);
    }

    #[test]
    fn click_on_empty_space_is_noop() {
        let mut stage = Stage::default();
        stage.apply(Action::Select(CakeId(1))).unwrap();
        let before = *stage.camera();
        let corner = Vec2::new(5.0, 5.0);
        assert_eq!(stage.click(corner, VIEWPORT), Action::Noop);
        assert!(
            stage
                .apply_in_viewport(Action::Click(corner), VIEWPORT)
                .unwrap()
                .is_none()
        );
        assert_eq!(*stage.camera(), before);
        assert_eq!(stage.scene().selected(), Some(CakeId(1)));
    }

    #[test]
    fn switching_never_leaves_two_enlarged() {
        let mut stage = Stage::default();
        let order = [1, 2, 3, 4, 2, 2, 1].map(CakeId);
        for id in order {
            stage.apply(Action::Select(id)).unwrap();
            let enlarged: Vec<CakeId> = stage.scene().enlarged().collect();
            assert_eq!(enlarged, vec![id]);
            let base = stage
                .scene()
                .cakes()
                .iter()
                .filter(|c| c.scale == BASE_SCALE)
                .count();
            assert_eq!(base, 3);
        }
    }
}
