use crate::coords::{PixelSize, Rect, Vec2};

/// A rectangle in page-normalized coordinates.
///
/// `(0, 0)` is the page's top-left corner and `(1, 1)` its bottom-right; Y
/// grows downward, opposite to world space. Only rectangles with
/// `top_left < bottom_right` on both axes describe a visible region.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RelativeRect {
    pub top_left: Vec2,
    pub bottom_right: Vec2,
}

impl RelativeRect {
    /// The whole page.
    pub const FULL: RelativeRect = RelativeRect {
        top_left: Vec2::new(0.0, 0.0),
        bottom_right: Vec2::new(1.0, 1.0),
    };

    pub const fn new(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self { top_left, bottom_right }
    }

    /// Expresses the world rectangle `detail` relative to the page quad `base`.
    pub fn from_world(detail: Rect, base: Rect) -> Self {
        let detail_top_left = Vec2::new(detail.min().x, detail.max().y);
        let detail_bottom_right = Vec2::new(detail.max().x, detail.min().y);
        let base_top_left = Vec2::new(base.min().x, base.max().y);

        let mut top_left = (detail_top_left - base_top_left).div_elem(base.size);
        let mut bottom_right = (detail_bottom_right - base_top_left).div_elem(base.size);

        top_left.y = -top_left.y;
        bottom_right.y = -bottom_right.y;

        Self { top_left, bottom_right }
    }

    /// Inverse of [`from_world`](Self::from_world).
    pub fn to_world(&self, base: Rect) -> Rect {
        let base_top_left = Vec2::new(base.min().x, base.max().y);
        let flip = |p: Vec2| Vec2::new(p.x, -p.y);

        let top_left = base_top_left + flip(self.top_left).mul_elem(base.size);
        let bottom_right = base_top_left + flip(self.bottom_right).mul_elem(base.size);

        Rect::from_min_max(
            Vec2::new(top_left.x, bottom_right.y),
            Vec2::new(bottom_right.x, top_left.y),
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_right.y - self.top_left.y
    }

    /// Strictly increasing on both axes and finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.top_left.is_finite()
            && self.bottom_right.is_finite()
            && self.top_left.x < self.bottom_right.x
            && self.top_left.y < self.bottom_right.y
    }

    /// Every coordinate inside `[0, 1]`.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.is_within(0.0)
    }

    /// Every coordinate inside `[-tolerance, 1 + tolerance]`.
    pub fn is_within(&self, tolerance: f32) -> bool {
        let inside = |v: f32| (-tolerance..=1.0 + tolerance).contains(&v);
        inside(self.top_left.x)
            && inside(self.top_left.y)
            && inside(self.bottom_right.x)
            && inside(self.bottom_right.y)
    }

    #[inline]
    pub fn clamped(&self) -> Self {
        Self {
            top_left: self.top_left.clamp(0.0, 1.0),
            bottom_right: self.bottom_right.clamp(0.0, 1.0),
        }
    }

    /// The rectangle in page pixels, as `(x, y, width, height)` with
    /// fractional precision.
    pub fn to_page_pixels(&self, page: PixelSize) -> Rect {
        let scale = page.as_vec2();
        Rect::from_min_max(self.top_left.mul_elem(scale), self.bottom_right.mul_elem(scale))
    }
}
