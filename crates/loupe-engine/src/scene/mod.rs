//! Presentation-facing draw stream.
//!
//! Responsibilities:
//! - describe which tiles are visible, where, and with which filtering
//! - provide deterministic ordering (stacking layer + insertion order)
//!
//! Pixel data is not copied here; presenters fetch buffers by [`TileKind`].

mod item;
mod key;
mod list;
mod z_index;

pub use item::{TileDraw, TileKind};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
