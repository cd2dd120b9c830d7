//! Orthographic camera state and the screen/world conversions built on it.
//!
//! The camera looks straight down onto the document plane, so conversions are
//! independent of depth: any two samples taken against the same
//! [`ViewportState`] agree on the plane they land on.

mod state;
mod transform;

pub use state::ViewportState;
pub use transform::{
    screen_to_world_point,
    screen_to_world_size,
    world_to_screen_point,
    world_to_screen_size,
};
