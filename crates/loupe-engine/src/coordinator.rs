//! Render decisions for the current page.
//!
//! The coordinator owns both tile textures and is the only caller of the
//! document source. It loads the base tile on navigation and batches the
//! frame's detail triggers into at most one partial render.

use crate::camera::ViewportState;
use crate::coords::{PixelSize, Rect, Vec2};
use crate::document::{DocumentSource, Page};
use crate::error::{RenderError, Result, ViewerError};
use crate::events::{PanEvent, TileEvent, ViewerEvent, ZoomEvent};
use crate::tiles::{FilterMode, RelativeRect, TileTexture, ViewportTileManager};

/// Rounding slack allowed on relative coordinates before a rectangle counts
/// as out of range.
const EDGE_TOLERANCE: f32 = 1e-4;

/// Why a detail render was requested.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderReason {
    PanOngoing,
    PanComplete,
    ZoomComplete,
    FootprintChanged,
}

/// Counters for every render decision taken.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    pub full_renders: u64,
    pub full_in_place: u64,
    pub partial_renders: u64,
    pub partial_in_place: u64,
    pub releases: u64,
    /// Triggers that produced no render (nothing visible, nothing changed).
    pub skipped: u64,
    pub clamped: u64,
    pub failures: u64,
}

#[derive(Debug)]
pub struct PageRenderCoordinator {
    page: Option<Page>,
    base: TileTexture,
    detail: TileTexture,
    /// Fraction of the display the page occupies at zoom 1.
    margin: f32,
    zoom: f32,
    /// Zoom level of the last successful detail render.
    render_scale: Option<f32>,
    last_rect: Option<RelativeRect>,
    pending: Option<RenderReason>,
    stats: RenderStats,
}

impl PageRenderCoordinator {
    pub fn new(margin: f32) -> Self {
        Self {
            page: None,
            base: TileTexture::new(FilterMode::Nearest),
            detail: TileTexture::new(FilterMode::Nearest),
            margin,
            zoom: 1.0,
            render_scale: None,
            last_rect: None,
            pending: None,
            stats: RenderStats::default(),
        }
    }

    #[inline]
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    #[inline]
    pub fn page_index(&self) -> Option<usize> {
        self.page.map(|p| p.index)
    }

    #[inline]
    pub fn base_texture(&self) -> &TileTexture {
        &self.base
    }

    #[inline]
    pub fn detail_texture(&self) -> &TileTexture {
        &self.detail
    }

    #[inline]
    pub fn render_scale(&self) -> Option<f32> {
        self.render_scale
    }

    /// Rectangle of the last successful detail render.
    #[inline]
    pub fn last_rect(&self) -> Option<RelativeRect> {
        self.last_rect
    }

    #[inline]
    pub fn pending(&self) -> Option<RenderReason> {
        self.pending
    }

    #[inline]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Navigates to `index`.
    ///
    /// Fits the page into the display and renders the base tile, then resets
    /// the camera and the detail tile. The base buffer is rendered in place
    /// when the new page needs the same pixel size as the old one.
    ///
    /// Nothing is touched until the base render succeeds, so a failed load
    /// leaves the previous page on screen.
    pub fn load_page<D: DocumentSource>(
        &mut self,
        index: usize,
        doc: &mut D,
        view: &mut ViewportState,
        tiles: &mut ViewportTileManager,
    ) -> Result<Page> {
        let count = doc.page_count();
        if index >= count {
            return Err(ViewerError::PageOutOfRange { index, count });
        }
        let page = doc.page(index)?;
        if page.size.area() == 0 {
            return Err(ViewerError::EmptyPage { index });
        }

        // Geometry at zoom 1, taken on a copy until the render is in.
        let mut fitted = *view;
        fitted.reset();
        let world = fit_page(page.size, fitted.world_size(), self.margin);
        let size = PixelSize::from_footprint(fitted.footprint(world)).ok_or(
            ViewerError::InvalidDisplay {
                width: view.display.width,
                height: view.display.height,
            },
        )?;

        if let Err(err) = self.render_base(doc, &page, size) {
            self.stats.failures += 1;
            log::warn!("page {index}: base render failed: {err}");
            return Err(err.into());
        }

        *view = fitted;
        tiles.reset();
        tiles.set_base(Rect::from_center_size(Vec2::zero(), world));
        self.reset_detail();
        self.page = Some(page);

        Ok(page)
    }

    fn render_base<D: DocumentSource>(
        &mut self,
        doc: &mut D,
        page: &Page,
        size: PixelSize,
    ) -> std::result::Result<(), RenderError> {
        if self.base.size() == Some(size) {
            if let Some(buffer) = self.base.buffer_mut() {
                doc.render_full_into(page, buffer)?;
                self.base.mark_page(page.index);
                self.stats.full_in_place += 1;
                log::info!("page {}: {} -> base {size} (reused)", page.index, page.size);
                return Ok(());
            }
        }

        let buffer = doc.render_full(page, size)?;
        if self.base.release() {
            self.stats.releases += 1;
        }
        self.base.assign(buffer, page.index);
        self.stats.full_renders += 1;
        log::info!("page {}: {} -> base {size}", page.index, page.size);
        Ok(())
    }

    fn reset_detail(&mut self) {
        if self.detail.release() {
            self.stats.releases += 1;
        }
        self.detail.set_filter(FilterMode::Nearest);
        self.zoom = 1.0;
        self.render_scale = None;
        self.last_rect = None;
        self.pending = None;
    }

    /// Records one notification. Renders are deferred to [`flush`](Self::flush).
    pub fn handle(&mut self, ev: &ViewerEvent) {
        let reason = match *ev {
            ViewerEvent::Pan(PanEvent::Ongoing) => RenderReason::PanOngoing,
            ViewerEvent::Pan(PanEvent::Complete) => RenderReason::PanComplete,
            ViewerEvent::Zoom(ZoomEvent::Started) => {
                self.detail.set_filter(FilterMode::Smooth);
                return;
            }
            ViewerEvent::Zoom(ZoomEvent::LevelChanged(zoom)) => {
                self.zoom = zoom;
                return;
            }
            ViewerEvent::Zoom(ZoomEvent::Complete) => {
                self.detail.set_filter(FilterMode::Nearest);
                RenderReason::ZoomComplete
            }
            ViewerEvent::Tile(TileEvent::FootprintChanged(_)) => RenderReason::FootprintChanged,
            ViewerEvent::PageChanged(_) => return,
        };
        self.pending.get_or_insert(reason);
    }

    /// Runs at most one detail render for everything handled since the last
    /// flush. Returns the trigger when a render was issued.
    ///
    /// Failures are logged and counted; the previous buffer stays in place.
    pub fn flush<D: DocumentSource>(
        &mut self,
        doc: &mut D,
        tiles: &ViewportTileManager,
    ) -> Option<RenderReason> {
        let reason = self.pending.take()?;

        let (Some(page), true, Some(size)) =
            (self.page, tiles.detail_visible(), tiles.footprint())
        else {
            self.stats.skipped += 1;
            return None;
        };

        let relative = RelativeRect::from_world(tiles.detail().rect(), tiles.base().rect());
        let Some(rect) = self.sanitize(relative) else {
            self.stats.skipped += 1;
            return None;
        };

        if self.detail.is_current(page.index, size)
            && self.last_rect == Some(rect)
            && self.render_scale == Some(self.zoom)
        {
            log::trace!("detail: {reason:?} with nothing to update");
            self.stats.skipped += 1;
            return None;
        }

        let rendered = if self.detail.page() == Some(page.index) && self.detail.size().is_some() {
            self.render_in_place(doc, &page, size, rect)
        } else {
            self.render_fresh(doc, &page, size, rect)
        };

        match rendered {
            Ok(()) => {
                log::debug!(
                    "detail: {reason:?} {size} ({:.3}, {:.3})-({:.3}, {:.3})",
                    rect.top_left.x,
                    rect.top_left.y,
                    rect.bottom_right.x,
                    rect.bottom_right.y,
                );
                self.last_rect = Some(rect);
                self.render_scale = Some(self.zoom);
                Some(reason)
            }
            Err(err) => {
                self.stats.failures += 1;
                log::warn!("detail: render failed: {err}");
                None
            }
        }
    }

    /// Clamps an out-of-range rectangle and rejects a degenerate one.
    ///
    /// Float noise at the page edges is clamped silently; anything further
    /// out is counted and logged.
    fn sanitize(&mut self, rect: RelativeRect) -> Option<RelativeRect> {
        if rect.is_valid() && rect.is_within(EDGE_TOLERANCE) {
            return Some(rect.clamped());
        }

        let clamped = rect.clamped();
        self.stats.clamped += 1;
        log::warn!("detail: relative rect {rect:?} clamped to {clamped:?}");
        clamped.is_valid().then_some(clamped)
    }

    /// Renders into the existing buffer. A changed footprint, or a source
    /// that rejects the buffer's size, goes through a fresh buffer instead.
    fn render_in_place<D: DocumentSource>(
        &mut self,
        doc: &mut D,
        page: &Page,
        size: PixelSize,
        rect: RelativeRect,
    ) -> std::result::Result<(), RenderError> {
        if self.detail.size() != Some(size) {
            log::debug!("detail: footprint now {size}");
            return self.render_fresh(doc, page, size, rect);
        }

        let Some(buffer) = self.detail.buffer_mut() else {
            return self.render_fresh(doc, page, size, rect);
        };

        match doc.render_partial_into(page, buffer, rect) {
            Ok(()) => {
                self.stats.partial_in_place += 1;
                Ok(())
            }
            Err(RenderError::BufferFootprintMismatch { expected, actual }) => {
                log::warn!("detail: buffer is {actual}, source wants {expected}; reallocating");
                self.render_fresh(doc, page, size, rect)
            }
            Err(err) => Err(err),
        }
    }

    fn render_fresh<D: DocumentSource>(
        &mut self,
        doc: &mut D,
        page: &Page,
        size: PixelSize,
        rect: RelativeRect,
    ) -> std::result::Result<(), RenderError> {
        let buffer = doc.render_partial(page, size, rect)?;
        if self.detail.release() {
            self.stats.releases += 1;
        }
        self.detail.assign(buffer, page.index);
        self.stats.partial_renders += 1;
        Ok(())
    }
}

/// World size of a page fitted into `view` at `margin`, keeping its aspect.
fn fit_page(page: PixelSize, view: Vec2, margin: f32) -> Vec2 {
    let page = page.as_vec2();
    let scale = (view.x / page.x).min(view.y / page.y) * margin;
    page * scale
}
