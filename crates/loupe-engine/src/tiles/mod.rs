//! The two-tier tile scheme.
//!
//! A cheap base tile covers the whole page; an expensive detail tile covers
//! only the part of the page the camera can see. [`ViewportTileManager`] keeps
//! the detail quad glued to that visible region, [`RelativeRect`] expresses it
//! in page coordinates, and [`TileTexture`] owns the backing buffers.

mod manager;
mod quad;
mod relative;
mod texture;

pub use manager::{TileSnapshot, ViewportTileManager};
pub use quad::Quad;
pub use relative::RelativeRect;
pub use texture::{FilterMode, TileTexture};
