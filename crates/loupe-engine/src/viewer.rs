//! The per-frame driver tying input, controllers, tiles and rendering together.

use crate::camera::ViewportState;
use crate::config::ViewerConfig;
use crate::controls::{PanController, ZoomController};
use crate::coordinator::{PageRenderCoordinator, RenderReason, RenderStats};
use crate::coords::{Rect, Vec2, Viewport};
use crate::document::{DocumentSource, Page, PixelBuffer};
use crate::error::{Result, ViewerError};
use crate::events::{ListenerId, ListenerRegistry, MovementListener, ViewerEvent};
use crate::input::{
    InputEvent, InputFrame, InputState, Key, KeyState, MouseButton, MouseButtonState,
    PointerButtonEvent, PointerMoveEvent,
};
use crate::scene::{DrawList, TileDraw, TileKind};
use crate::tiles::{TileTexture, ViewportTileManager};
use crate::time::FrameTime;

/// What one call to [`Viewer::frame`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Notifications in delivery order.
    pub events: Vec<ViewerEvent>,
    /// Trigger of the detail render issued this frame, if any.
    pub rendered: Option<RenderReason>,
}

/// Pan/zoom viewer over one paginated document.
///
/// The host feeds input with [`apply_event`](Self::apply_event) and then calls
/// [`frame`](Self::frame) once per frame. Within a frame the camera is updated
/// first, then the tile geometry, then at most one detail render is issued,
/// and finally subscribed listeners are notified.
pub struct Viewer<D: DocumentSource> {
    config: ViewerConfig,
    document: D,
    view: ViewportState,
    input: InputState,
    input_frame: InputFrame,
    pan: PanController,
    zoom: ZoomController,
    tiles: ViewportTileManager,
    coordinator: PageRenderCoordinator,
    listeners: ListenerRegistry,
}

impl<D: DocumentSource> Viewer<D> {
    /// Opens `document` on its first page.
    pub fn new(document: D, config: ViewerConfig) -> Result<Self> {
        if !config.display.is_valid() {
            return Err(ViewerError::InvalidDisplay {
                width: config.display.width,
                height: config.display.height,
            });
        }
        if document.page_count() == 0 {
            return Err(ViewerError::EmptyDocument);
        }

        let mut viewer = Self {
            config,
            document,
            view: ViewportState::new(config.display, config.base_half_height),
            input: InputState::default(),
            input_frame: InputFrame::default(),
            pan: PanController::new(config.pan_slice),
            zoom: ZoomController::new(config.zoom_step, config.zoom_idle),
            tiles: ViewportTileManager::new(config.top_layer, config.bottom_layer),
            coordinator: PageRenderCoordinator::new(config.page_margin),
            listeners: ListenerRegistry::new(),
        };
        viewer.load(0)?;
        Ok(viewer)
    }

    #[inline]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[inline]
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The document source. Page geometry is only re-read on navigation.
    #[inline]
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    #[inline]
    pub fn view(&self) -> &ViewportState {
        &self.view
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn tiles(&self) -> &ViewportTileManager {
        &self.tiles
    }

    #[inline]
    pub fn coordinator(&self) -> &PageRenderCoordinator {
        &self.coordinator
    }

    #[inline]
    pub fn stats(&self) -> &RenderStats {
        self.coordinator.stats()
    }

    #[inline]
    pub fn zoom_level(&self) -> f32 {
        self.zoom.level()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.pan.is_dragging()
    }

    #[inline]
    pub fn is_zooming(&self) -> bool {
        self.zoom.is_zooming()
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    pub fn page(&self) -> Option<&Page> {
        self.coordinator.page()
    }

    pub fn page_index(&self) -> usize {
        self.coordinator.page_index().unwrap_or(0)
    }

    pub fn subscribe(&mut self, listener: Box<dyn MovementListener>) -> ListenerId {
        self.listeners.register(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    /// Records one input event for the next [`frame`](Self::frame).
    pub fn apply_event(&mut self, ev: InputEvent) {
        self.input.apply_event(&mut self.input_frame, ev);
    }

    /// Runs one frame over the input recorded since the previous one.
    pub fn frame(&mut self, time: &FrameTime) -> FrameReport {
        let mut events = Vec::new();

        let current = self.page_index();
        let target = self.navigation_target(current);
        if target != current {
            match self.load(target) {
                Ok(_) => events.push(ViewerEvent::PageChanged(target)),
                Err(err) => log::warn!("navigation to page {target} failed: {err}"),
            }
        }

        self.drive_pan();
        self.pan.update(time.dt);
        self.zoom.update(
            time,
            self.input.pointer(),
            self.input_frame.scroll_lines,
            &mut self.view,
            self.tiles.base().rect(),
        );

        let controller_events: Vec<ViewerEvent> = self
            .pan
            .events_mut()
            .drain()
            .map(ViewerEvent::from)
            .chain(self.zoom.events_mut().drain().map(ViewerEvent::from))
            .collect();

        for ev in controller_events {
            events.push(ev);
            self.update_tiles(&ev);
            events.extend(self.tiles.events_mut().drain().map(ViewerEvent::from));
        }

        let rendered = self.deliver(&events);
        self.input_frame.clear();

        FrameReport { events, rendered }
    }

    /// Jumps to page `index`. Navigating to the current page does nothing.
    pub fn go_to_page(&mut self, index: usize) -> Result<()> {
        let count = self.page_count();
        if index >= count {
            return Err(ViewerError::PageOutOfRange { index, count });
        }
        if self.coordinator.page_index() == Some(index) {
            return Ok(());
        }

        self.load(index)?;
        self.deliver(&[ViewerEvent::PageChanged(index)]);
        Ok(())
    }

    /// Changes the display size and refits the detail tile to it.
    ///
    /// The base tile keeps its world size until the next page load.
    pub fn resize(&mut self, display: Viewport) -> Result<()> {
        if !display.is_valid() {
            return Err(ViewerError::InvalidDisplay {
                width: display.width,
                height: display.height,
            });
        }

        self.config.display = display;
        self.view.display = display;

        if self.tiles.detail_active() {
            let fitted = self.tiles.resize_detail(&self.view);
            self.tiles.set_detail_visible(fitted.is_some());
        }

        let events: Vec<ViewerEvent> =
            self.tiles.events_mut().drain().map(ViewerEvent::from).collect();
        self.deliver(&events);
        Ok(())
    }

    /// Visible tiles, back to front.
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::new();

        let base = self.tiles.base();
        if self.coordinator.base_texture().buffer().is_some() {
            list.push(base.layer, self.tile_draw(TileKind::Base, base.rect()));
        }

        let detail = self.tiles.detail();
        if self.tiles.detail_visible() && self.coordinator.detail_texture().buffer().is_some() {
            list.push(detail.layer, self.tile_draw(TileKind::Detail, detail.rect()));
        }

        list
    }

    fn tile_draw(&self, kind: TileKind, world_rect: Rect) -> TileDraw {
        TileDraw {
            kind,
            world_rect,
            filter: self.tile_texture(kind).filter(),
        }
    }

    pub fn tile_texture(&self, kind: TileKind) -> &TileTexture {
        match kind {
            TileKind::Base => self.coordinator.base_texture(),
            TileKind::Detail => self.coordinator.detail_texture(),
        }
    }

    /// Pixels currently backing a tile.
    pub fn tile_buffer(&self, kind: TileKind) -> Option<&PixelBuffer> {
        self.tile_texture(kind).buffer()
    }

    /// Loads `index`; on failure the controllers and camera are left as they were.
    fn load(&mut self, index: usize) -> Result<Page> {
        let page = self
            .coordinator
            .load_page(index, &mut self.document, &mut self.view, &mut self.tiles)?;
        self.pan.reset();
        self.zoom.reset(&mut self.view);
        log::info!("viewing page {} of {}", index + 1, self.document.page_count());
        Ok(page)
    }

    /// Applies this frame's navigation keys in arrival order.
    fn navigation_target(&self, current: usize) -> usize {
        let last = self.document.page_count().saturating_sub(1);

        self.input_frame
            .events
            .iter()
            .filter_map(|ev| match ev {
                InputEvent::Key { key, state: KeyState::Pressed, repeat: false }
                    if self.input_frame.keys_pressed.contains(key) =>
                {
                    Some(*key)
                }
                _ => None,
            })
            .fold(current, |page, key| match key {
                Key::BracketLeft | Key::PageDown => (page + 1).min(last),
                Key::BracketRight | Key::PageUp => page.saturating_sub(1),
                Key::Home => 0,
                Key::End => last,
                Key::Unknown(_) => page,
            })
    }

    /// Feeds left-button drags to the pan controller in arrival order.
    fn drive_pan(&mut self) {
        let base = self.tiles.base().rect();

        for ev in &self.input_frame.events {
            match *ev {
                InputEvent::PointerButton(PointerButtonEvent {
                    button: MouseButton::Left,
                    state,
                    x,
                    y,
                }) => {
                    let p = Vec2::new(x, y);
                    match state {
                        MouseButtonState::Pressed => {
                            let hit = base.contains(self.view.screen_to_world(p));
                            if self.pan.begin_drag(hit) {
                                self.pan.drag_to(p, &mut self.view);
                            }
                        }
                        MouseButtonState::Released => {
                            self.pan.drag_to(p, &mut self.view);
                            self.pan.end_drag();
                        }
                    }
                }
                InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                    self.pan.drag_to(Vec2::new(x, y), &mut self.view);
                }
                _ => {}
            }
        }

        if self.input_frame.focus_lost {
            self.pan.end_drag();
        }
    }

    fn update_tiles(&mut self, ev: &ViewerEvent) {
        let fitted = match *ev {
            ViewerEvent::Pan(_) => self.tiles.on_pan(&self.view),
            ViewerEvent::Zoom(crate::events::ZoomEvent::LevelChanged(level)) => {
                self.tiles.on_zoom_level_changed(level, &self.view)
            }
            _ => return,
        };

        if self.tiles.detail_active() {
            self.tiles.set_detail_visible(fitted.is_some());
        }
    }

    /// Hands a batch to the coordinator, renders, then notifies listeners.
    fn deliver(&mut self, events: &[ViewerEvent]) -> Option<RenderReason> {
        for ev in events {
            self.coordinator.handle(ev);
        }
        let rendered = self.coordinator.flush(&mut self.document, &self.tiles);

        for ev in events {
            self.listeners.dispatch(ev);
        }
        if !events.is_empty() {
            self.listeners.tiles_updated(&self.tiles.snapshot());
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::PixelSize;
    use crate::error::RenderError;
    use crate::tiles::RelativeRect;

    struct Blank {
        pages: usize,
    }

    impl DocumentSource for Blank {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn page(&mut self, index: usize) -> std::result::Result<Page, RenderError> {
            Ok(Page::new(index, PixelSize::new(300, 400)))
        }

        fn render_full_into(
            &mut self,
            _page: &Page,
            _buffer: &mut PixelBuffer,
        ) -> std::result::Result<(), RenderError> {
            Ok(())
        }

        fn render_partial_into(
            &mut self,
            _page: &Page,
            _buffer: &mut PixelBuffer,
            _rect: RelativeRect,
        ) -> std::result::Result<(), RenderError> {
            Ok(())
        }
    }

    fn viewer(pages: usize) -> Viewer<Blank> {
        let config = ViewerConfig::default().with_display(Viewport::new(400.0, 300.0));
        Viewer::new(Blank { pages }, config).expect("viewer")
    }

    fn frame_at(frame_index: u64) -> FrameTime {
        FrameTime::new(1.0 / 60.0, frame_index as f64 / 60.0, frame_index)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn rejects_empty_document_and_bad_display() {
        assert!(matches!(
            Viewer::new(Blank { pages: 0 }, ViewerConfig::default()),
            Err(ViewerError::EmptyDocument)
        ));

        let config = ViewerConfig::default().with_display(Viewport::new(0.0, 10.0));
        assert!(matches!(
            Viewer::new(Blank { pages: 1 }, config),
            Err(ViewerError::InvalidDisplay { .. })
        ));
    }

    #[test]
    fn opens_on_first_page_with_base_only() {
        let mut v = viewer(2);
        assert_eq!(v.page_index(), 0);
        assert!(v.tile_buffer(TileKind::Base).is_some());
        assert!(v.tile_buffer(TileKind::Detail).is_none());

        let kinds: Vec<_> = v.draw_list().iter_in_paint_order().map(|i| i.tile.kind).collect();
        assert_eq!(kinds, vec![TileKind::Base]);
    }

    // ── navigation ────────────────────────────────────────────────────────

    #[test]
    fn bracket_keys_step_and_clamp() {
        let mut v = viewer(2);

        v.apply_event(InputEvent::key_pressed(Key::BracketLeft));
        let report = v.frame(&frame_at(1));
        assert_eq!(v.page_index(), 1);
        assert_eq!(report.events, vec![ViewerEvent::PageChanged(1)]);

        // Release so the next press registers as a new one.
        v.apply_event(InputEvent::Key {
            key: Key::BracketLeft,
            state: KeyState::Released,
            repeat: false,
        });
        v.apply_event(InputEvent::key_pressed(Key::BracketLeft));
        let report = v.frame(&frame_at(2));
        assert_eq!(v.page_index(), 1);
        assert!(report.events.is_empty());

        v.apply_event(InputEvent::key_pressed(Key::BracketRight));
        v.frame(&frame_at(3));
        assert_eq!(v.page_index(), 0);
    }

    #[test]
    fn go_to_page_validates_index() {
        let mut v = viewer(3);
        assert!(matches!(
            v.go_to_page(3),
            Err(ViewerError::PageOutOfRange { index: 3, count: 3 })
        ));
        v.go_to_page(2).expect("in range");
        assert_eq!(v.page_index(), 2);
    }

    // ── pan ───────────────────────────────────────────────────────────────

    #[test]
    fn drag_outside_page_is_ignored() {
        let mut v = viewer(1);
        v.apply_event(InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, 1.0, 1.0));
        v.apply_event(InputEvent::pointer_moved(50.0, 50.0));
        v.frame(&frame_at(1));

        assert!(!v.is_dragging());
        assert_eq!(v.view().center, Vec2::zero());
    }

    #[test]
    fn focus_loss_completes_drag() {
        let mut v = viewer(1);
        v.apply_event(InputEvent::button(
            MouseButton::Left,
            MouseButtonState::Pressed,
            200.0,
            150.0,
        ));
        v.frame(&frame_at(1));
        assert!(v.is_dragging());

        v.apply_event(InputEvent::Focused(false));
        let report = v.frame(&frame_at(2));
        assert!(!v.is_dragging());
        assert_eq!(report.events, vec![ViewerEvent::Pan(crate::events::PanEvent::Complete)]);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_refits_active_detail() {
        let mut v = viewer(1);
        v.apply_event(InputEvent::pointer_moved(200.0, 150.0));
        v.apply_event(InputEvent::wheel_lines(1.0));
        v.frame(&frame_at(1));
        let before = v.tiles().footprint();

        v.resize(Viewport::new(800.0, 600.0)).expect("valid");
        assert_ne!(v.tiles().footprint(), before);
        assert_eq!(v.tile_texture(TileKind::Detail).size(), v.tiles().footprint());

        assert!(v.resize(Viewport::new(-1.0, 5.0)).is_err());
    }
}
