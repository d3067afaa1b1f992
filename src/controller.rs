//! Pointer and keyboard handling for the crop region.

use eframe::egui::{self, Key, Modifiers, PointerButton, Pos2, Vec2, pos2};

use crate::constant::{AXIS_STEP, HIT_ZONE, RESIZE_STEP};
use crate::mapper::DisplayTransform;
use crate::region::{Axis, CropModel, CropRegion, round_half_up};

/// The subset of window input the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2, button: PointerButton },
    PointerUp,
    PointerMoved(Pos2),
    KeyDown { key: Key, modifiers: Modifiers },
}

impl InputEvent {
    pub fn from_egui(event: &egui::Event) -> Option<Self> {
        match *event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                ..
            } => Some(Self::PointerDown { pos, button }),
            egui::Event::PointerButton { pressed: false, .. } => Some(Self::PointerUp),
            egui::Event::PointerMoved(pos) => Some(Self::PointerMoved(pos)),
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => Some(Self::KeyDown { key, modifiers }),
            _ => None,
        }
    }
}

/// Requests the controller cannot fulfil itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    /// Pointer minus region top-left at press time.
    Moving { anchor: Vec2 },
    /// Region bottom-right minus pointer at press time.
    Resizing { anchor: Vec2 },
}

pub struct Controller {
    model: CropModel,
    gesture: Gesture,
    changed: bool,
}

impl Controller {
    pub fn new(model: CropModel) -> Self {
        Self {
            model,
            gesture: Gesture::Idle,
            changed: false,
        }
    }

    pub fn region(&self) -> CropRegion {
        self.model.region()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Returns and clears the "region changed" flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn handle(&mut self, event: InputEvent, transform: &DisplayTransform) -> Option<Command> {
        match event {
            InputEvent::PointerDown { pos, button } => {
                if button == PointerButton::Primary && !transform.is_degenerate() {
                    self.pointer_down(transform.to_image_space(pos));
                }
                None
            }
            InputEvent::PointerUp => {
                if self.is_dragging() {
                    log::debug!("gesture ended at {:?}", self.model.region());
                }
                self.gesture = Gesture::Idle;
                None
            }
            InputEvent::PointerMoved(pos) => {
                if !transform.is_degenerate() {
                    self.pointer_moved(transform.to_image_space(pos));
                }
                None
            }
            InputEvent::KeyDown { key, modifiers } => self.key_down(key, modifiers),
        }
    }

    fn pointer_down(&mut self, p: Pos2) {
        if self.gesture != Gesture::Idle {
            return;
        }
        let r = self.model.region();
        let inside = p.x >= r.x as f32
            && p.x <= r.right() as f32
            && p.y >= r.y as f32
            && p.y <= r.bottom() as f32;
        if !inside {
            return;
        }

        let corner = pos2(r.right() as f32, r.bottom() as f32);
        let half = HIT_ZONE / 2.0;
        if (p.x - corner.x).abs() < half && (p.y - corner.y).abs() < half {
            self.gesture = Gesture::Resizing { anchor: corner - p };
            log::debug!("resize started at {p:?}");
        } else {
            self.gesture = Gesture::Moving {
                anchor: p - pos2(r.x as f32, r.y as f32),
            };
            log::debug!("move started at {p:?}");
        }
    }

    fn pointer_moved(&mut self, p: Pos2) {
        let changed = match self.gesture {
            Gesture::Idle => false,
            Gesture::Moving { anchor } => {
                let top_left = p - anchor;
                self.model
                    .move_to(round_half_up(top_left.x), round_half_up(top_left.y))
            }
            Gesture::Resizing { anchor } => {
                let bottom_right = p + anchor;
                let r = self.model.region();
                self.model.resize_to(
                    round_half_up(bottom_right.x) - r.x,
                    round_half_up(bottom_right.y) - r.y,
                )
            }
        };
        self.changed |= changed;
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers) -> Option<Command> {
        let ctrl = modifiers.ctrl || modifiers.command;
        let changed = match key {
            Key::Escape | Key::Q => return Some(Command::Quit),
            Key::S => return Some(Command::Save),
            Key::Plus | Key::Equals => self.model.grow_shrink_both(RESIZE_STEP),
            Key::Minus => self.model.grow_shrink_both(-RESIZE_STEP),
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown => {
                let (dx, dy) = match key {
                    Key::ArrowLeft => (-1, 0),
                    Key::ArrowRight => (1, 0),
                    Key::ArrowUp => (0, -1),
                    _ => (0, 1),
                };
                if ctrl {
                    self.model.jump(dx, dy)
                } else if modifiers.shift {
                    let axis = if dx != 0 { Axis::Horizontal } else { Axis::Vertical };
                    self.model.grow_shrink_axis(axis, (dx + dy) * AXIS_STEP)
                } else {
                    self.model.nudge(dx, dy)
                }
            }
            _ => false,
        };
        self.changed |= changed;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Rect, vec2};

    /// 800x600 image shown 1:1 so display points equal image pixels.
    fn setup() -> (Controller, DisplayTransform) {
        let transform = DisplayTransform::fit(
            Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)),
            [800, 600],
        );
        (Controller::new(CropModel::initialize(800, 600)), transform)
    }

    fn press(c: &mut Controller, t: &DisplayTransform, x: f32, y: f32) {
        c.handle(
            InputEvent::PointerDown {
                pos: pos2(x, y),
                button: PointerButton::Primary,
            },
            t,
        );
    }

    fn key(c: &mut Controller, t: &DisplayTransform, key: Key, modifiers: Modifiers) -> Option<Command> {
        c.handle(InputEvent::KeyDown { key, modifiers }, t)
    }

    #[test]
    fn test_drag_moves_region() {
        let (mut c, t) = setup();
        press(&mut c, &t, 300.0, 200.0);
        assert!(c.is_dragging());
        c.handle(InputEvent::PointerMoved(pos2(310.4, 190.5)), &t);
        assert_eq!(c.region(), CropRegion::new(282, 163, 256, 256));
        assert!(c.take_changed());
        assert!(!c.take_changed());
        c.handle(InputEvent::PointerUp, &t);
        assert!(!c.is_dragging());
        c.handle(InputEvent::PointerMoved(pos2(100.0, 100.0)), &t);
        assert_eq!(c.region(), CropRegion::new(282, 163, 256, 256));
        assert!(!c.take_changed());
    }

    #[test]
    fn test_drag_past_edge_pins() {
        let (mut c, t) = setup();
        press(&mut c, &t, 300.0, 200.0);
        c.handle(InputEvent::PointerMoved(pos2(-500.0, 2000.0)), &t);
        assert_eq!(c.region(), CropRegion::new(0, 344, 256, 256));
    }

    #[test]
    fn test_corner_press_resizes() {
        let (mut c, t) = setup();
        // Bottom-right corner is at (528, 428).
        press(&mut c, &t, 520.0, 420.0);
        c.handle(InputEvent::PointerMoved(pos2(570.0, 450.0)), &t);
        assert_eq!(c.region(), CropRegion::new(272, 172, 286, 286));
        c.handle(InputEvent::PointerMoved(pos2(0.0, 0.0)), &t);
        assert_eq!(c.region().w, crate::constant::MIN_SIZE);
    }

    #[test]
    fn test_press_on_corner_resizes() {
        let (mut c, t) = setup();
        press(&mut c, &t, 528.0, 428.0);
        c.handle(InputEvent::PointerMoved(pos2(538.0, 448.0)), &t);
        assert_eq!(c.region(), CropRegion::new(272, 172, 266, 266));
    }

    #[test]
    fn test_press_just_outside_corner_is_ignored() {
        let (mut c, t) = setup();
        press(&mut c, &t, 532.0, 430.0);
        assert!(!c.is_dragging());
        c.handle(InputEvent::PointerMoved(pos2(582.0, 460.0)), &t);
        assert_eq!(c.region(), CropRegion::new(272, 172, 256, 256));
        assert!(!c.take_changed());
    }

    #[test]
    fn test_press_near_but_outside_hit_zone_moves() {
        let (mut c, t) = setup();
        // 18 px from the corner on both axes, inside the region.
        press(&mut c, &t, 510.0, 410.0);
        c.handle(InputEvent::PointerMoved(pos2(520.0, 410.0)), &t);
        assert_eq!(c.region(), CropRegion::new(282, 172, 256, 256));
    }

    #[test]
    fn test_press_on_right_edge_moves() {
        let (mut c, t) = setup();
        press(&mut c, &t, 528.0, 300.0);
        c.handle(InputEvent::PointerMoved(pos2(518.0, 300.0)), &t);
        assert_eq!(c.region(), CropRegion::new(262, 172, 256, 256));
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let (mut c, t) = setup();
        press(&mut c, &t, 10.0, 10.0);
        assert!(!c.is_dragging());
        c.handle(InputEvent::PointerMoved(pos2(50.0, 50.0)), &t);
        assert_eq!(c.region(), CropRegion::new(272, 172, 256, 256));
    }

    #[test]
    fn test_secondary_button_does_not_start_gesture() {
        let (mut c, t) = setup();
        c.handle(
            InputEvent::PointerDown {
                pos: pos2(300.0, 200.0),
                button: PointerButton::Secondary,
            },
            &t,
        );
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_arrow_keys() {
        let (mut c, t) = setup();
        assert_eq!(key(&mut c, &t, Key::ArrowRight, Modifiers::NONE), None);
        assert_eq!(c.region().x, 273);
        key(&mut c, &t, Key::ArrowLeft, Modifiers::CTRL);
        assert_eq!(c.region().x, 17);
        key(&mut c, &t, Key::ArrowRight, Modifiers::SHIFT);
        assert_eq!(c.region(), CropRegion::new(17, 172, 257, 256));
        key(&mut c, &t, Key::ArrowUp, Modifiers::SHIFT);
        assert_eq!(c.region(), CropRegion::new(17, 172, 257, 255));
        assert!(c.take_changed());
    }

    #[test]
    fn test_ctrl_wins_over_shift() {
        let (mut c, t) = setup();
        key(&mut c, &t, Key::ArrowRight, Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(c.region(), CropRegion::new(528, 172, 256, 256));
    }

    #[test]
    fn test_plus_minus() {
        let (mut c, t) = setup();
        key(&mut c, &t, Key::Plus, Modifiers::SHIFT);
        assert_eq!(c.region().w, 272);
        key(&mut c, &t, Key::Equals, Modifiers::NONE);
        assert_eq!(c.region().w, 288);
        key(&mut c, &t, Key::Minus, Modifiers::NONE);
        assert_eq!(c.region().w, 272);
    }

    #[test]
    fn test_rejected_key_leaves_flag_clear() {
        let (mut c, t) = setup();
        key(&mut c, &t, Key::ArrowUp, Modifiers::CTRL);
        assert!(!c.take_changed());
    }

    #[test]
    fn test_commands() {
        let (mut c, t) = setup();
        assert_eq!(key(&mut c, &t, Key::S, Modifiers::NONE), Some(Command::Save));
        assert_eq!(key(&mut c, &t, Key::Q, Modifiers::NONE), Some(Command::Quit));
        assert_eq!(key(&mut c, &t, Key::Escape, Modifiers::NONE), Some(Command::Quit));
        assert!(!c.take_changed());
    }

    #[test]
    fn test_keys_work_mid_drag() {
        let (mut c, t) = setup();
        press(&mut c, &t, 300.0, 200.0);
        key(&mut c, &t, Key::ArrowDown, Modifiers::NONE);
        assert_eq!(c.region().y, 173);
        assert!(c.is_dragging());
    }

    #[test]
    fn test_scaled_display() {
        let t = DisplayTransform::fit(
            Rect::from_min_size(Pos2::ZERO, vec2(1280.0, 900.0)),
            [800, 600],
        );
        let mut c = Controller::new(CropModel::initialize(800, 600));
        // Image (300, 200) is display (490, 300).
        press(&mut c, &t, 490.0, 300.0);
        c.handle(InputEvent::PointerMoved(pos2(505.0, 315.0)), &t);
        assert_eq!(c.region(), CropRegion::new(282, 182, 256, 256));
    }

    #[test]
    fn test_from_egui() {
        let down = egui::Event::PointerButton {
            pos: pos2(1.0, 2.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(
            InputEvent::from_egui(&down),
            Some(InputEvent::PointerDown {
                pos: pos2(1.0, 2.0),
                button: PointerButton::Primary
            })
        );
        assert_eq!(
            InputEvent::from_egui(&egui::Event::PointerMoved(pos2(3.0, 4.0))),
            Some(InputEvent::PointerMoved(pos2(3.0, 4.0)))
        );
        assert_eq!(InputEvent::from_egui(&egui::Event::Text("s".to_owned())), None);
    }
}
