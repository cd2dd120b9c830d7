use super::Vec2;

/// Axis-aligned rectangle stored as its minimum corner plus size.
///
/// The type is space-agnostic: in screen space `origin` is the top-left corner,
/// in world space (+Y up) it is the bottom-left corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::from_origin_size(min, max - min)
    }

    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_size(center - size * 0.5, size)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    /// True when `other` lies entirely inside `self`, within `eps`.
    #[inline]
    pub fn contains_rect(self, other: Rect, eps: f32) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        b.min().x >= a.min().x - eps
            && b.min().y >= a.min().y - eps
            && b.max().x <= a.max().x + eps
            && b.max().y <= a.max().y + eps
    }

    /// Overlap of two rectangles.
    ///
    /// `min = max(a.min, b.min)`, `max = min(a.max, b.max)`; an intersection
    /// exists only when `min < max` on both axes, so rectangles that merely share
    /// an edge do not intersect.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let min = a.min().max(b.min());
        let max = a.max().min(b.max());

        if min.x < max.x && min.y < max.y {
            Some(Rect::from_min_max(min, max))
        } else {
            None
        }
    }
}
