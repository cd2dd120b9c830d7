use crate::coords::{Rect, Vec2};
use crate::scene::ZIndex;

/// A tile's world-space placement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub center: Vec2,
    pub size: Vec2,
    /// Which tile renders on top.
    pub layer: ZIndex,
}

impl Quad {
    pub const fn new(center: Vec2, size: Vec2, layer: ZIndex) -> Self {
        Self { center, size, layer }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    #[inline]
    pub fn set_rect(&mut self, rect: Rect) {
        self.center = rect.center();
        self.size = rect.size;
    }

    /// North-west corner (world +Y is up).
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.center.x - self.size.x * 0.5, self.center.y + self.size.y * 0.5)
    }

    /// South-east corner.
    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.center.x + self.size.x * 0.5, self.center.y - self.size.y * 0.5)
    }
}
