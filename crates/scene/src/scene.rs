use crate::catalog::Catalog;
use cakestand_common::{CakeId, Rgba};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Scale of every cake that is not selected.
pub const BASE_SCALE: f32 = 1.0;
/// Scale of the selected cake.
pub const ENLARGED_SCALE: f32 = 1.5;
/// World position of the floating name label.
pub const LABEL_ANCHOR: Vec3 = Vec3::new(0.0, 2.0, 0.0);
/// Label glyph height in world units.
pub const LABEL_FONT_SIZE: f32 = 0.5;

/// A displayed cake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cake {
    pub id: CakeId,
    pub name: String,
    pub position: Vec3,
    pub scale: f32,
    pub color: Rgba,
    pub image: PathBuf,
}

/// The floating label shown for the selected cake.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Vec3,
    pub font_size: f32,
    pub color: Rgba,
}

/// Result of a successful `Scene::select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<CakeId>,
    pub current: CakeId,
}

impl SelectionChange {
    /// True when the same cake was selected again.
    pub fn is_reselect(&self) -> bool {
        self.previous == Some(self.current)
    }
}

/// Record of a scene mutation, drained by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Selected {
        id: CakeId,
        previous: Option<CakeId>,
    },
    ScaleChanged {
        id: CakeId,
        old: f32,
        new: f32,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("cake {0} is not in the catalog")]
    UnknownCake(CakeId),
}

/// Scene state: the fixed cake list plus the current selection.
///
/// Cakes keep catalog order. The only mutations are the selection and the
/// scales that follow it, both applied in one `select` call.
#[derive(Debug, Clone)]
pub struct Scene {
    cakes: Vec<Cake>,
    selected: Option<CakeId>,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Build a scene with nothing selected and every cake at `BASE_SCALE`.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let cakes = catalog
            .cakes
            .iter()
            .map(|spec| Cake {
                id: spec.id,
                name: spec.name.clone(),
                position: Vec3::from_array(spec.position),
                scale: BASE_SCALE,
                color: spec.color,
                image: spec.image.clone(),
            })
            .collect();
        Self {
            cakes,
            selected: None,
            events: Vec::new(),
        }
    }

    pub fn cakes(&self) -> &[Cake] {
        &self.cakes
    }

    pub fn cake(&self, id: CakeId) -> Option<&Cake> {
        self.cakes.iter().find(|c| c.id == id)
    }

    pub fn selected(&self) -> Option<CakeId> {
        self.selected
    }

    pub fn selected_cake(&self) -> Option<&Cake> {
        self.selected.and_then(|id| self.cake(id))
    }

    /// Ids of cakes currently at `ENLARGED_SCALE`.
    pub fn enlarged(&self) -> impl Iterator<Item = CakeId> + '_ {
        self.cakes
            .iter()
            .filter(|c| c.scale == ENLARGED_SCALE)
            .map(|c| c.id)
    }

    /// Select a cake: it becomes `ENLARGED_SCALE`, every other cake `BASE_SCALE`.
    ///
    /// Unknown ids leave the scene untouched.
    pub fn select(&mut self, id: CakeId) -> Result<SelectionChange, SceneError> {
        if self.cake(id).is_none() {
            return Err(SceneError::UnknownCake(id));
        }

        let previous = self.selected.replace(id);
        for cake in &mut self.cakes {
            let new = if cake.id == id {
                ENLARGED_SCALE
            } else {
                BASE_SCALE
            };
            if cake.scale != new {
                self.events.push(SceneEvent::ScaleChanged {
                    id: cake.id,
                    old: cake.scale,
                    new,
                });
                cake.scale = new;
            }
        }
        self.events.push(SceneEvent::Selected { id, previous });
        tracing::debug!("selected cake {id} (previous {previous:?})");

        Ok(SelectionChange {
            previous,
            current: id,
        })
    }

    /// The label for the selected cake, if any.
    pub fn label(&self) -> Option<Label> {
        self.selected_cake().map(|cake| Label {
            text: cake.name.clone(),
            anchor: LABEL_ANCHOR,
            font_size: LABEL_FONT_SIZE,
            color: Rgba::BLACK,
        })
    }

    /// Drain and return pending events.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only access to pending events.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_catalog(&Catalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(scene: &Scene) -> Vec<CakeId> {
        scene.cakes().iter().map(|c| c.id).collect()
    }

    #[test]
    fn scene_starts_unselected_at_base_scale() {
        let scene = Scene::default();
        assert_eq!(scene.cakes().len(), 4);
        assert!(scene.selected().is_none());
        assert!(scene.cakes().iter().all(|c| c.scale == BASE_SCALE));
        assert_eq!(scene.enlarged().count(), 0);
    }

    #[test]
    fn selecting_any_cake_enlarges_only_that_cake() {
        for id in ids(&Scene::default()) {
            let mut scene = Scene::default();
            scene.select(id).unwrap();
            let enlarged: Vec<CakeId> = scene.enlarged().collect();
            assert_eq!(enlarged, vec![id]);
            for cake in scene.cakes().iter().filter(|c| c.id != id) {
                assert_eq!(cake.scale, BASE_SCALE);
            }
        }
    }

    #[test]
    fn reselect_is_idempotent() {
        let mut scene = Scene::default();
        scene.select(CakeId(2)).unwrap();
        let before: Vec<f32> = scene.cakes().iter().map(|c| c.scale).collect();
        scene.drain_events();

        let change = scene.select(CakeId(2)).unwrap();
        assert!(change.is_reselect());
        let after: Vec<f32> = scene.cakes().iter().map(|c| c.scale).collect();
        assert_eq!(before, after);
        assert_eq!(scene.selected(), Some(CakeId(2)));
        // Only the Selected record, no scale changes
        assert_eq!(
            scene.events(),
            &[SceneEvent::Selected {
                id: CakeId(2),
                previous: Some(CakeId(2)),
            }]
        );
    }

    #[test]
    fn switching_selection_moves_enlargement() {
        let mut scene = Scene::default();
        scene.select(CakeId(1)).unwrap();
        scene.drain_events();

        let change = scene.select(CakeId(4)).unwrap();
        assert_eq!(change.previous, Some(CakeId(1)));
        assert_eq!(change.current, CakeId(4));
        assert_eq!(scene.enlarged().collect::<Vec<_>>(), vec![CakeId(4)]);
        assert_eq!(scene.cake(CakeId(1)).unwrap().scale, BASE_SCALE);

        let events = scene.drain_events();
        assert_eq!(
            events,
            vec![
                SceneEvent::ScaleChanged {
                    id: CakeId(1),
                    old: ENLARGED_SCALE,
                    new: BASE_SCALE,
                },
                SceneEvent::ScaleChanged {
                    id: CakeId(4),
                    old: BASE_SCALE,
                    new: ENLARGED_SCALE,
                },
                SceneEvent::Selected {
                    id: CakeId(4),
                    previous: Some(CakeId(1)),
                },
            ]
        );
    }

    #[test]
    fn unknown_cake_leaves_scene_untouched() {
        let mut scene = Scene::default();
        scene.select(CakeId(3)).unwrap();
        scene.drain_events();

        let err = scene.select(CakeId(99)).unwrap_err();
        assert!(matches!(err, SceneError::UnknownCake(CakeId(99))));
        assert_eq!(scene.selected(), Some(CakeId(3)));
        assert_eq!(scene.enlarged().collect::<Vec<_>>(), vec![CakeId(3)]);
        assert!(scene.events().is_empty());
    }

    #[test]
    fn label_follows_selection() {
        let mut scene = Scene::default();
        assert!(scene.label().is_none());

        scene.select(CakeId(3)).unwrap();
        let label = scene.label().unwrap();
        assert_eq!(label.text, "Strawberry Cake");
        assert_eq!(label.anchor, LABEL_ANCHOR);
        assert_eq!(label.color, Rgba::BLACK);

        scene.select(CakeId(4)).unwrap();
        assert_eq!(scene.label().unwrap().text, "Lemon Cake");
    }

    #[test]
    fn cakes_keep_catalog_positions() {
        let scene = Scene::default();
        let chocolate = scene.cake(CakeId(1)).unwrap();
        assert_eq!(chocolate.position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(chocolate.image, PathBuf::from("PinkBunny.png"));
    }
}
