//! Input subsystem.
//!
//! Public API is platform-agnostic. The host translates its window-system events
//! into [`InputEvent`]s and feeds them to the viewer; the core never owns input
//! capture.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
    PIXELS_PER_LINE,
};
