use crate::action::Action;
use glam::Vec2;

/// Maximum pointer travel, in physical pixels, for a press/release to count as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: click to select, drag to orbit.
    Primary,
    /// Right button: drag to pan.
    Secondary,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    button: PointerButton,
    origin: Vec2,
    dragging: bool,
}

/// Turns press / move / release / wheel events into actions.
///
/// Only one button is tracked at a time; presses of other buttons while one
/// is held are ignored.
#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: Vec2,
    press: Option<Press>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether a held button has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    pub fn moved(&mut self, position: Vec2) -> Option<Action> {
        let delta = position - self.cursor;
        self.cursor = position;

        let press = self.press.as_mut()?;
        let delta = if press.dragging {
            delta
        } else if (position - press.origin).length() > CLICK_SLOP_PX {
            press.dragging = true;
            // First drag step carries the travel accumulated inside the slop.
            position - press.origin
        } else {
            return None;
        };

        match press.button {
            PointerButton::Primary => Some(Action::Orbit(delta)),
            PointerButton::Secondary => Some(Action::Pan(delta)),
            PointerButton::Other => None,
        }
    }

    pub fn pressed(&mut self, button: PointerButton) {
        if self.press.is_some() {
            return;
        }
        self.press = Some(Press {
            button,
            origin: self.cursor,
            dragging: false,
        });
    }

    /// A primary release that never became a drag yields `Action::Click`.
    pub fn released(&mut self, button: PointerButton) -> Option<Action> {
        let press = self.press.filter(|p| p.button == button)?;
        self.press = None;
        if press.dragging || button != PointerButton::Primary {
            return None;
        }
        Some(Action::Click(self.cursor))
    }

    /// Forget a held `button` without producing an action, for releases
    /// handled elsewhere.
    pub fn cancel(&mut self, button: PointerButton) {
        if self.press.is_some_and(|p| p.button == button) {
            self.press = None;
        }
    }

    /// Wheel scroll in lines; positive scrolls away from the user (zoom in).
    pub fn wheel(&mut self, lines: f32) -> Option<Action> {
        (lines != 0.0).then_some(Action::Zoom(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_in_place_is_click() {
        let mut p = PointerTracker::new();
        p.moved(Vec2::new(100.0, 50.0));
        p.pressed(PointerButton::Primary);
        assert_eq!(
            p.released(PointerButton::Primary),
            Some(Action::Click(Vec2::new(100.0, 50.0)))
        );
    }

    #[test]
    fn small_jitter_is_still_click() {
        let mut p = PointerTracker::new();
        p.moved(Vec2::new(10.0, 10.0));
        p.pressed(PointerButton::Primary);
        assert_eq!(p.moved(Vec2::new(12.0, 11.0)), None);
        assert!(!p.is_dragging());
        assert!(matches!(
            p.released(PointerButton::Primary),
            Some(Action::Click(_))
        ));
    }

    #[test]
    fn primary_drag_orbits_and_suppresses_click() {
        let mut p = PointerTracker::new();
        p.pressed(PointerButton::Primary);
        assert_eq!(
            p.moved(Vec2::new(10.0, 0.0)),
            Some(Action::Orbit(Vec2::new(10.0, 0.0)))
        );
        assert_eq!(
            p.moved(Vec2::new(13.0, 2.0)),
            Some(Action::Orbit(Vec2::new(3.0, 2.0)))
        );
        assert!(p.is_dragging());
        assert_eq!(p.released(PointerButton::Primary), None);
        assert!(!p.is_dragging());
    }

    #[test]
    fn secondary_drag_pans_and_never_clicks() {
        let mut p = PointerTracker::new();
        p.pressed(PointerButton::Secondary);
        assert_eq!(
            p.moved(Vec2::new(0.0, 20.0)),
            Some(Action::Pan(Vec2::new(0.0, 20.0)))
        );
        assert_eq!(p.released(PointerButton::Secondary), None);

        p.pressed(PointerButton::Secondary);
        assert_eq!(p.released(PointerButton::Secondary), None);
    }

    #[test]
    fn hover_without_press_does_nothing() {
        let mut p = PointerTracker::new();
        assert_eq!(p.moved(Vec2::new(50.0, 50.0)), None);
        assert_eq!(p.released(PointerButton::Primary), None);
        assert_eq!(p.cursor(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn second_button_while_held_is_ignored() {
        let mut p = PointerTracker::new();
        p.pressed(PointerButton::Primary);
        p.pressed(PointerButton::Secondary);
        assert_eq!(p.released(PointerButton::Secondary), None);
        assert!(matches!(
            p.released(PointerButton::Primary),
            Some(Action::Click(_))
        ));
    }

    #[test]
    fn cancelled_press_frees_the_tracker() {
        let mut p = PointerTracker::new();
        p.pressed(PointerButton::Primary);
        p.cancel(PointerButton::Secondary);
        assert_eq!(
            p.moved(Vec2::new(20.0, 0.0)),
            Some(Action::Orbit(Vec2::new(20.0, 0.0)))
        );

        p.cancel(PointerButton::Primary);
        assert!(!p.is_dragging());
        assert_eq!(p.released(PointerButton::Primary), None);

        p.pressed(PointerButton::Secondary);
        assert_eq!(
            p.moved(Vec2::new(20.0, 10.0)),
            Some(Action::Pan(Vec2::new(0.0, 10.0)))
        );
    }

    #[test]
    fn wheel_maps_to_zoom() {
        let mut p = PointerTracker::new();
        assert_eq!(p.wheel(1.5), Some(Action::Zoom(1.5)));
        assert_eq!(p.wheel(0.0), None);
    }
}
