use crate::camera::ViewportState;
use crate::coords::{PixelSize, Rect, Vec2};
use crate::events::{EventQueue, TileEvent};
use crate::scene::ZIndex;

use super::Quad;

/// Read-only view of the tile geometry at the end of a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileSnapshot {
    pub base: Quad,
    /// Present only while the detail tile is active and visible.
    pub detail: Option<Quad>,
    /// Last reported detail footprint.
    pub footprint: Option<PixelSize>,
}

/// Keeps the detail quad glued to the visible part of the base quad.
///
/// The detail quad is always the intersection of the camera rectangle and the
/// base quad. When the two stop overlapping the quad is left where it was and
/// the caller decides whether to hide it.
#[derive(Debug)]
pub struct ViewportTileManager {
    base: Quad,
    detail: Quad,
    detail_active: bool,
    detail_visible: bool,
    footprint: Option<PixelSize>,
    top: ZIndex,
    bottom: ZIndex,
    events: EventQueue<TileEvent>,
}

impl ViewportTileManager {
    pub fn new(top: ZIndex, bottom: ZIndex) -> Self {
        Self {
            base: Quad::new(Vec2::zero(), Vec2::zero(), top),
            detail: Quad::new(Vec2::zero(), Vec2::zero(), bottom),
            detail_active: false,
            detail_visible: false,
            footprint: None,
            top,
            bottom,
            events: EventQueue::new(),
        }
    }

    #[inline]
    pub fn base(&self) -> &Quad {
        &self.base
    }

    #[inline]
    pub fn detail(&self) -> &Quad {
        &self.detail
    }

    #[inline]
    pub fn detail_active(&self) -> bool {
        self.detail_active
    }

    /// Active and not hidden by an empty intersection.
    #[inline]
    pub fn detail_visible(&self) -> bool {
        self.detail_active && self.detail_visible
    }

    #[inline]
    pub fn set_detail_visible(&mut self, visible: bool) {
        self.detail_visible = visible;
    }

    #[inline]
    pub fn footprint(&self) -> Option<PixelSize> {
        self.footprint
    }

    /// Places the base quad; done once per page load.
    pub fn set_base(&mut self, rect: Rect) {
        self.base.set_rect(rect);
    }

    /// Pan ongoing or complete. Returns the new detail rectangle, if any.
    pub fn on_pan(&mut self, view: &ViewportState) -> Option<Rect> {
        if !self.detail_active {
            return None;
        }
        self.resize_detail(view)
    }

    /// Swaps the stacking order around level 1 and refits the detail quad.
    pub fn on_zoom_level_changed(&mut self, zoom: f32, view: &ViewportState) -> Option<Rect> {
        if zoom == 1.0 {
            if self.detail_active {
                log::debug!("tiles: detail deactivated");
            }
            self.detail_active = false;
            self.detail_visible = false;
            // Reactivation must report a footprint even if it matches the old one.
            self.footprint = None;
            self.base.layer = self.top;
            self.detail.layer = self.bottom;
            return None;
        }

        if !self.detail_active {
            log::debug!("tiles: detail activated at zoom {zoom}");
            self.detail_active = true;
            self.detail_visible = true;
        }
        self.detail.layer = self.top;
        self.base.layer = self.bottom;
        self.resize_detail(view)
    }

    /// Fits the detail quad to the camera/base intersection.
    ///
    /// Emits [`TileEvent::FootprintChanged`] when the rounded pixel size of the
    /// quad differs from the last one reported. Returns `None` and leaves the
    /// quad untouched when the camera does not overlap the base.
    pub fn resize_detail(&mut self, view: &ViewportState) -> Option<Rect> {
        let Some(rect) = view.world_rect().intersect(self.base.rect()) else {
            log::debug!("tiles: camera does not overlap the page");
            return None;
        };

        self.detail.set_rect(rect);

        let Some(size) = PixelSize::from_footprint(view.footprint(rect.size)) else {
            log::warn!("tiles: non-finite footprint for {:?}", rect.size);
            return Some(rect);
        };

        if self.footprint != Some(size) {
            log::debug!("tiles: footprint {size}");
            self.footprint = Some(size);
            self.events.push(TileEvent::FootprintChanged(size));
        }
        Some(rect)
    }

    /// Deactivates the detail tile and forgets the footprint, silently.
    pub fn reset(&mut self) {
        self.detail_active = false;
        self.detail_visible = false;
        self.footprint = None;
        self.base.layer = self.top;
        self.detail.layer = self.bottom;
        self.events.clear();
    }

    pub fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            base: self.base,
            detail: self.detail_visible().then_some(self.detail),
            footprint: self.footprint,
        }
    }

    pub fn events_mut(&mut self) -> &mut EventQueue<TileEvent> {
        &mut self.events
    }
}
