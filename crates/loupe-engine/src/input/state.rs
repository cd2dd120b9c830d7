use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for the viewer surface.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the surface is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck buttons when focus changes mid-drag.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    frame.focus_lost = true;
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(*key);
                    if inserted && !*repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta } => {
                frame.scroll_lines += delta.vertical_lines();
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer_pos.map(|(x, y)| Vec2::new(x, y))
    }
}
