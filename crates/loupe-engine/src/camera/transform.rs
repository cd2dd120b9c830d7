//! Stateless screen/world conversions for an orthographic camera.
//!
//! Inputs outside the display are accepted and extrapolated linearly.

use crate::coords::{Vec2, Viewport};

use super::ViewportState;

/// Converts a world-space extent to its on-screen size in pixels.
pub fn world_to_screen_size(world: Vec2, half_height: f32, aspect: f32, display: Viewport) -> Vec2 {
    let height_doubled = 2.0 * half_height;
    Vec2::new(
        world.x / (height_doubled * aspect) * display.width,
        world.y / height_doubled * display.height,
    )
}

/// Exact inverse of [`world_to_screen_size`].
pub fn screen_to_world_size(
    screen: Vec2,
    half_height: f32,
    aspect: f32,
    display: Viewport,
) -> Vec2 {
    let height_doubled = 2.0 * half_height;
    Vec2::new(
        screen.x / display.width * (height_doubled * aspect),
        screen.y / display.height * height_doubled,
    )
}

/// Maps a screen point (top-left origin, +Y down) onto the world plane (+Y up).
pub fn screen_to_world_point(screen: Vec2, view: &ViewportState) -> Vec2 {
    let u = screen.x / view.display.width - 0.5;
    let v = 0.5 - screen.y / view.display.height;
    Vec2::new(
        view.center.x + u * 2.0 * view.half_width(),
        view.center.y + v * 2.0 * view.half_height,
    )
}

/// Exact inverse of [`screen_to_world_point`].
pub fn world_to_screen_point(world: Vec2, view: &ViewportState) -> Vec2 {
    let rel = world - view.center;
    let u = rel.x / (2.0 * view.half_width()) + 0.5;
    let v = 0.5 - rel.y / (2.0 * view.half_height);
    Vec2::new(u * view.display.width, v * view.display.height)
}
