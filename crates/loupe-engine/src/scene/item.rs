use crate::coords::Rect;
use crate::tiles::FilterMode;

/// Which of the two tiles a draw item refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TileKind {
    /// Low-resolution tile covering the whole page.
    Base,
    /// High-resolution tile covering the visible part of the page.
    Detail,
}

/// One tile to present: its world rectangle and sampling mode.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileDraw {
    pub kind: TileKind,
    pub world_rect: Rect,
    pub filter: FilterMode,
}
