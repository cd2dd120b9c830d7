use std::fmt;

/// Wheel pixels treated as one "line" when normalizing high-precision scrolls.
pub const PIXELS_PER_LINE: f32 = 40.0;

/// Keyboard key identifier.
///
/// Only keys the viewer reacts to are named; everything else maps to
/// `Key::Unknown(code)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    /// First page.
    Home,
    /// Last page.
    End,
    /// Previous page.
    PageUp,
    /// Next page.
    PageDown,

    /// `[`: next page.
    BracketLeft,
    /// `]`: previous page.
    BracketRight,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Mouse wheel delta.
///
/// `Line` corresponds to notched wheels; `Pixel` is high precision (trackpads).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical scroll in line units. Positive scrolls up (zoom in).
    pub fn vertical_lines(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / PIXELS_PER_LINE,
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Coordinates are included so processing does not depend on a separately
/// tracked pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel { delta: MouseWheelDelta },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    pub fn pointer_moved(x: f32, y: f32) -> Self {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    pub fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> Self {
        InputEvent::PointerButton(PointerButtonEvent { button, state, x, y })
    }

    pub fn wheel_lines(y: f32) -> Self {
        InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y } }
    }

    pub fn key_pressed(key: Key) -> Self {
        InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
