//! Coordinate and geometry types shared by the camera, controllers and tiles.
//!
//! Three spaces are in play:
//! - screen: logical pixels, origin top-left, +X right, +Y down
//! - world: camera plane units, +X right, +Y up ("north")
//! - page: normalized `[0, 1] × [0, 1]`, origin at the page's top-left, +Y down
//!
//! Conversions between them live in [`crate::camera`].

mod pixel_size;
mod rect;
mod vec2;
mod viewport;

pub use pixel_size::PixelSize;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
