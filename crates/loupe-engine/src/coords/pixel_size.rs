use std::fmt;

use super::Vec2;

/// Integer buffer dimensions.
///
/// Geometry stays real-valued through the whole pipeline; rounding happens only
/// here, when a footprint becomes an allocation size.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds a real-valued pixel footprint to buffer dimensions.
    ///
    /// Each side is at least one pixel; non-finite input yields `None`.
    pub fn from_footprint(footprint: Vec2) -> Option<Self> {
        if !footprint.is_finite() {
            return None;
        }
        let w = footprint.x.round().max(1.0);
        let h = footprint.y.round().max(1.0);
        Some(Self::new(w as u32, h as u32))
    }

    #[inline]
    pub fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
