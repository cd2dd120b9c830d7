use crate::coords::{Rect, Vec2, Viewport};

use super::transform;

/// Camera state shared by the pan/zoom controllers and the tile manager.
///
/// Only the controllers mutate it; everyone else reads. It survives page
/// changes and is [`reset`](Self::reset) on navigation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportState {
    /// Camera center in world units.
    pub center: Vec2,
    /// Current orthographic half-height in world units.
    pub half_height: f32,
    /// Half-height at zoom level 1.
    pub base_half_height: f32,
    /// Multiplicative zoom level, never below 1.
    pub zoom: f32,
    /// Display the camera projects onto.
    pub display: Viewport,
}

impl ViewportState {
    pub fn new(display: Viewport, base_half_height: f32) -> Self {
        Self {
            center: Vec2::zero(),
            half_height: base_half_height,
            base_half_height,
            zoom: 1.0,
            display,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.display.aspect()
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_height * self.aspect()
    }

    /// Full extent of the visible region in world units.
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(2.0 * self.half_width(), 2.0 * self.half_height)
    }

    /// The visible world-space rectangle.
    #[inline]
    pub fn world_rect(&self) -> Rect {
        Rect::from_center_size(self.center, self.world_size())
    }

    /// Applies a zoom level, recomputing the half-height from the base.
    ///
    /// Levels below 1 are clamped. The center is left alone; anchoring is the
    /// zoom controller's job.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(1.0);
        self.half_height = self.base_half_height / self.zoom;
    }

    /// Zoom back to 1 and clear any pan offset.
    pub fn reset(&mut self) {
        self.center = Vec2::zero();
        self.set_zoom(1.0);
    }

    #[inline]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        transform::screen_to_world_point(screen, self)
    }

    /// On-screen pixel footprint of a world-space extent.
    #[inline]
    pub fn footprint(&self, world_size: Vec2) -> Vec2 {
        transform::world_to_screen_size(world_size, self.half_height, self.aspect(), self.display)
    }
}
