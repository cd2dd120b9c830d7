use std::cell::RefCell;
use std::rc::Rc;

use loupe_engine::coords::{PixelSize, Vec2, Viewport};
use loupe_engine::events::{MovementListener, PanEvent, TileEvent, ViewerEvent, ZoomEvent};
use loupe_engine::input::{InputEvent, Key, MouseButton, MouseButtonState};
use loupe_engine::scene::{TileKind, ZIndex};
use loupe_engine::tiles::{RelativeRect, TileSnapshot};
use loupe_engine::time::{FrameClock, FrameTime};
use loupe_engine::{
    DocumentSource, FrameReport, Page, PixelBuffer, RenderError, Viewer, ViewerConfig, ViewerError,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Calls {
    full: usize,
    full_into: usize,
    partial: usize,
    partial_into: usize,
}

impl Calls {
    fn detail_renders(&self) -> usize {
        self.partial + self.partial_into
    }
}

/// Collaborator calls that currently fail.
#[derive(Debug, Default, Clone, Copy)]
struct Faults {
    page: bool,
    full: bool,
    partial: bool,
}

/// Document source that counts what it is asked to do and paints every
/// rendered pixel opaque white.
struct RecordingDocument {
    sizes: Vec<PixelSize>,
    calls: Calls,
    rects: Vec<RelativeRect>,
    faults: Faults,
}

impl RecordingDocument {
    fn with_sizes(sizes: &[(u32, u32)]) -> Self {
        Self {
            sizes: sizes.iter().map(|&(w, h)| PixelSize::new(w, h)).collect(),
            calls: Calls::default(),
            rects: Vec::new(),
            faults: Faults::default(),
        }
    }

    fn square_pages(count: usize) -> Self {
        Self::with_sizes(&vec![(600, 600); count])
    }
}

fn offline() -> RenderError {
    RenderError::Backend("renderer offline".into())
}

fn painted(size: PixelSize) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(size);
    buffer.pixels_mut().fill(0xff);
    buffer
}

impl DocumentSource for RecordingDocument {
    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn page(&mut self, index: usize) -> Result<Page, RenderError> {
        if self.faults.page {
            return Err(offline());
        }
        self.sizes
            .get(index)
            .map(|&size| Page::new(index, size))
            .ok_or(RenderError::PageOutOfRange { index, count: self.sizes.len() })
    }

    fn render_full_into(
        &mut self,
        _page: &Page,
        buffer: &mut PixelBuffer,
    ) -> Result<(), RenderError> {
        self.calls.full_into += 1;
        if self.faults.full {
            return Err(offline());
        }
        buffer.pixels_mut().fill(0xff);
        Ok(())
    }

    fn render_partial_into(
        &mut self,
        _page: &Page,
        buffer: &mut PixelBuffer,
        rect: RelativeRect,
    ) -> Result<(), RenderError> {
        self.calls.partial_into += 1;
        if self.faults.partial {
            return Err(offline());
        }
        self.rects.push(rect);
        buffer.pixels_mut().fill(0xff);
        Ok(())
    }

    fn render_full(&mut self, _page: &Page, size: PixelSize) -> Result<PixelBuffer, RenderError> {
        self.calls.full += 1;
        if self.faults.full {
            return Err(offline());
        }
        Ok(painted(size))
    }

    fn render_partial(
        &mut self,
        _page: &Page,
        size: PixelSize,
        rect: RelativeRect,
    ) -> Result<PixelBuffer, RenderError> {
        self.calls.partial += 1;
        if self.faults.partial {
            return Err(offline());
        }
        self.rects.push(rect);
        Ok(painted(size))
    }
}

struct Session {
    viewer: Viewer<RecordingDocument>,
    clock: FrameClock,
}

impl Session {
    fn new(pages: usize) -> Self {
        Self::open(RecordingDocument::square_pages(pages))
    }

    fn open(document: RecordingDocument) -> Self {
        let config = ViewerConfig::default().with_display(Viewport::new(800.0, 600.0));
        let viewer = Viewer::new(document, config).expect("viewer");
        Self { viewer, clock: FrameClock::new() }
    }

    fn faults(&mut self) -> &mut Faults {
        &mut self.viewer.document_mut().faults
    }

    fn calls(&self) -> Calls {
        self.viewer.document().calls
    }

    fn frame(&mut self, input: &[InputEvent]) -> (FrameTime, FrameReport) {
        for ev in input {
            self.viewer.apply_event(ev.clone());
        }
        let time = self.clock.step(DT);
        let report = self.viewer.frame(&time);
        (time, report)
    }

    fn idle(&mut self, frames: usize) -> Vec<ViewerEvent> {
        (0..frames).flat_map(|_| self.frame(&[]).1.events).collect()
    }

    /// One notch per frame with the pointer at `at`, then waits until settled.
    fn zoom(&mut self, notches: i32, at: Vec2) {
        let dir = notches.signum() as f32;
        for _ in 0..notches.abs() {
            self.frame(&scroll(at, dir));
        }
        self.idle(12);
        assert!(!self.viewer.is_zooming());
    }

    /// Left-drag from `from` by `step` per frame.
    fn drag(&mut self, from: Vec2, step: Vec2, frames: usize) -> Vec<ViewerEvent> {
        let mut events = self.frame(&[left(MouseButtonState::Pressed, from)]).1.events;

        let mut p = from;
        for _ in 0..frames {
            p += step;
            events.extend(self.frame(&[InputEvent::pointer_moved(p.x, p.y)]).1.events);
        }

        events.extend(self.frame(&[left(MouseButtonState::Released, p)]).1.events);
        events
    }
}

/// One wheel notch with the pointer at `at`.
fn scroll(at: Vec2, lines: f32) -> [InputEvent; 2] {
    [InputEvent::pointer_moved(at.x, at.y), InputEvent::wheel_lines(lines)]
}

fn left(state: MouseButtonState, at: Vec2) -> InputEvent {
    InputEvent::button(MouseButton::Left, state, at.x, at.y)
}

fn count(events: &[ViewerEvent], wanted: ViewerEvent) -> usize {
    events.iter().filter(|ev| **ev == wanted).count()
}

const CENTER: Vec2 = Vec2::new(400.0, 300.0);

// ── zoom ──────────────────────────────────────────────────────────────────

#[test]
fn zoom_complete_fires_once_after_idle_threshold() {
    let mut s = Session::new(1);
    let mut last_scroll = 0.0;
    let mut events = Vec::new();

    for _ in 0..3 {
        let (time, report) = s.frame(&scroll(CENTER, 1.0));
        last_scroll = time.elapsed;
        events.extend(report.events);
    }

    let mut completed_at = None;
    for _ in 0..30 {
        let (time, report) = s.frame(&[]);
        if report.events.contains(&ViewerEvent::Zoom(ZoomEvent::Complete)) {
            assert!(completed_at.is_none(), "complete fired twice");
            completed_at = Some(time.elapsed);
        }
        events.extend(report.events);
    }

    let completed_at = completed_at.expect("zoom completed");
    assert!(completed_at - last_scroll > 0.1);
    assert!(completed_at - last_scroll <= 0.1 + DT as f64 + 1e-9);
    assert_eq!(count(&events, ViewerEvent::Zoom(ZoomEvent::Started)), 1);
    assert_eq!(count(&events, ViewerEvent::Zoom(ZoomEvent::Complete)), 1);
}

#[test]
fn zoom_level_never_drops_below_one() {
    let mut s = Session::new(1);
    s.zoom(2, CENTER);
    s.zoom(-5, CENTER);

    assert_eq!(s.viewer.zoom_level(), 1.0);
    assert_eq!(s.viewer.view().zoom, 1.0);
}

#[test]
fn point_under_cursor_stays_put_while_zooming() {
    let mut s = Session::new(1);
    let cursor = Vec2::new(610.0, 170.0);

    for _ in 0..4 {
        let before = s.viewer.view().screen_to_world(cursor);
        s.frame(&scroll(cursor, 1.0));
        let after = s.viewer.view().screen_to_world(cursor);
        assert!(before.approx_eq(after, 1e-5), "{before:?} vs {after:?}");
    }
}

#[test]
fn zoom_back_to_one_deactivates_detail_after_panning() {
    let mut s = Session::new(1);
    s.zoom(4, CENTER);
    assert!(s.viewer.tiles().detail_active());
    assert_eq!(s.viewer.tiles().detail().layer, ZIndex::TOP);

    s.drag(CENTER, Vec2::new(6.0, -4.0), 20);
    s.zoom(-4, CENTER);

    let tiles = s.viewer.tiles();
    assert!(!tiles.detail_active());
    assert_eq!(tiles.base().layer, ZIndex::TOP);
    assert_eq!(tiles.detail().layer, ZIndex::BOTTOM);

    let kinds: Vec<_> = s.viewer.draw_list().iter_in_paint_order().map(|i| i.tile.kind).collect();
    assert_eq!(kinds, vec![TileKind::Base]);
}

// ── pan ───────────────────────────────────────────────────────────────────

#[test]
fn drag_there_and_back_restores_camera() {
    let mut s = Session::new(1);
    s.zoom(3, CENTER);
    let start = s.viewer.view().center;

    let mut events = s.drag(CENTER, Vec2::new(7.0, 3.0), 15);
    events.extend(s.drag(CENTER + Vec2::new(105.0, 45.0), Vec2::new(-7.0, -3.0), 15));

    assert!(s.viewer.view().center.approx_eq(start, 1e-5));
    assert_eq!(count(&events, ViewerEvent::Pan(PanEvent::Complete)), 2);
}

#[test]
fn panning_inside_the_page_never_reallocates() {
    let mut s = Session::new(1);
    s.zoom(10, CENTER);
    let settled = s.calls();
    let releases = s.viewer.stats().releases;

    let events = s.drag(CENTER, Vec2::new(2.5, 1.0), 24);
    let after = s.calls();

    assert!(count(&events, ViewerEvent::Pan(PanEvent::Ongoing)) >= 1);
    assert!(!events.iter().any(|ev| matches!(ev, ViewerEvent::Tile(_))));
    assert_eq!(after.partial, settled.partial);
    assert!(after.partial_into > settled.partial_into);
    assert_eq!(s.viewer.stats().releases, releases);
}

#[test]
fn at_most_one_detail_render_per_frame() {
    let mut s = Session::new(1);

    let mut script: Vec<Vec<InputEvent>> = Vec::new();
    for _ in 0..6 {
        script.push(scroll(CENTER, 1.0).to_vec());
    }
    script.push(vec![left(MouseButtonState::Pressed, CENTER)]);
    for i in 0..30 {
        let x = 400.0 + i as f32 * 4.0;
        script.push(scroll(Vec2::new(x, 300.0), 1.0).to_vec());
    }
    script.push(vec![left(MouseButtonState::Released, Vec2::new(520.0, 300.0))]);

    for input in script {
        let before = s.calls().detail_renders();
        let (_, report) = s.frame(&input);
        let rendered = s.calls().detail_renders() - before;
        assert!(rendered <= 1, "{rendered} renders for {:?}", report.events);
        assert_eq!(rendered == 1, report.rendered.is_some());
    }
}

#[test]
fn every_requested_rect_is_inside_the_page() {
    let mut s = Session::new(1);
    s.zoom(5, Vec2::new(20.0, 30.0));
    s.drag(Vec2::new(400.0, 300.0), Vec2::new(-30.0, 20.0), 40);
    s.zoom(3, Vec2::new(780.0, 580.0));

    let rects = &s.viewer.document().rects;
    assert!(!rects.is_empty());
    for rect in rects {
        assert!(rect.is_valid() && rect.is_in_range(), "{rect:?}");
    }
}

// ── navigation ────────────────────────────────────────────────────────────

#[test]
fn navigation_while_zoomed_resets_view() {
    let mut s = Session::new(3);
    s.zoom(5, Vec2::new(500.0, 200.0));
    s.drag(CENTER, Vec2::new(3.0, 3.0), 10);
    assert!(s.viewer.tiles().detail_active());

    let (_, report) = s.frame(&[InputEvent::key_pressed(Key::BracketLeft)]);

    assert_eq!(report.events.first(), Some(&ViewerEvent::PageChanged(1)));
    assert_eq!(s.viewer.page_index(), 1);
    assert_eq!(s.viewer.zoom_level(), 1.0);
    assert_eq!(s.viewer.view().center, Vec2::zero());
    assert!(!s.viewer.tiles().detail_active());
    assert!(s.viewer.tile_buffer(TileKind::Detail).is_none());
}

#[test]
fn same_sized_pages_reuse_the_base_buffer() {
    let mut s = Session::new(3);
    s.viewer.go_to_page(1).expect("page 1");
    s.viewer.go_to_page(2).expect("page 2");
    s.viewer.go_to_page(2).expect("no-op");

    assert_eq!(s.calls().full, 1);
    assert_eq!(s.calls().full_into, 2);
}

// ── render failures ───────────────────────────────────────────────────────

fn all_white(buffer: Option<&PixelBuffer>) -> bool {
    buffer.is_some_and(|b| b.pixels().iter().all(|&p| p == 0xff))
}

#[test]
fn failed_page_render_keeps_current_page_on_screen() {
    let mut s = Session::new(2);
    s.zoom(4, Vec2::new(500.0, 200.0));
    let view = *s.viewer.view();
    let zoom = s.viewer.zoom_level();

    s.faults().full = true;
    let (_, report) = s.frame(&[InputEvent::key_pressed(Key::BracketLeft)]);

    assert!(!report.events.iter().any(|ev| matches!(ev, ViewerEvent::PageChanged(_))));
    assert_eq!(s.viewer.page_index(), 0);
    assert_eq!(s.viewer.zoom_level(), zoom);
    assert_eq!(*s.viewer.view(), view);
    assert!(s.viewer.tiles().detail_active());
    assert_eq!(s.viewer.tile_texture(TileKind::Base).page(), Some(0));
    assert!(all_white(s.viewer.tile_buffer(TileKind::Base)));
    assert!(all_white(s.viewer.tile_buffer(TileKind::Detail)));
    assert_eq!(s.viewer.stats().failures, 1);
}

#[test]
fn failed_page_of_new_size_keeps_old_base_buffer() {
    let mut s = Session::open(RecordingDocument::with_sizes(&[(600, 600), (600, 300)]));
    let base = s.viewer.tile_buffer(TileKind::Base).map(PixelBuffer::size);

    s.faults().full = true;
    assert!(matches!(s.viewer.go_to_page(1), Err(ViewerError::Render(_))));

    assert_eq!(s.viewer.page_index(), 0);
    assert_eq!(s.viewer.tile_buffer(TileKind::Base).map(PixelBuffer::size), base);
    assert!(all_white(s.viewer.tile_buffer(TileKind::Base)));
    assert_eq!(s.viewer.stats().releases, 0);

    s.faults().full = false;
    s.viewer.go_to_page(1).expect("page 1");
    assert_eq!(s.viewer.page_index(), 1);
    assert_ne!(s.viewer.tile_buffer(TileKind::Base).map(PixelBuffer::size), base);
}

#[test]
fn failed_page_lookup_leaves_zoom_untouched() {
    let mut s = Session::new(2);
    s.zoom(3, CENTER);
    s.drag(CENTER, Vec2::new(4.0, 2.0), 10);
    let view = *s.viewer.view();

    s.faults().page = true;
    assert!(matches!(s.viewer.go_to_page(1), Err(ViewerError::Render(_))));

    assert_eq!(s.viewer.page_index(), 0);
    assert_eq!(*s.viewer.view(), view);
    assert!(s.viewer.zoom_level() > 1.0);
    assert!(s.viewer.tiles().detail_active());

    // Three notches out must land exactly back on level 1.
    s.faults().page = false;
    s.zoom(-3, CENTER);
    assert_eq!(s.viewer.zoom_level(), 1.0);
    assert!(!s.viewer.tiles().detail_active());
}

#[test]
fn failed_detail_render_keeps_previous_tile() {
    let mut s = Session::new(1);
    s.zoom(4, CENTER);
    let before = s.viewer.tile_buffer(TileKind::Detail).cloned().expect("detail");
    assert!(all_white(Some(&before)));

    s.faults().partial = true;
    for _ in 0..2 {
        let (_, report) = s.frame(&scroll(CENTER, 1.0));
        assert_eq!(report.rendered, None);
    }
    s.idle(12);
    s.drag(CENTER, Vec2::new(3.0, 0.0), 20);

    assert!(s.viewer.stats().failures >= 2);
    assert_eq!(s.viewer.tile_buffer(TileKind::Detail), Some(&before));
    assert_eq!(s.viewer.tile_texture(TileKind::Detail).page(), Some(0));
    let kinds: Vec<_> = s.viewer.draw_list().iter_in_paint_order().map(|i| i.tile.kind).collect();
    assert_eq!(kinds, vec![TileKind::Base, TileKind::Detail]);

    s.faults().partial = false;
    s.drag(CENTER, Vec2::new(-3.0, 0.0), 20);
    assert_eq!(s.viewer.tile_texture(TileKind::Detail).size(), s.viewer.tiles().footprint());
}

// ── listeners ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Seen {
    log: Vec<String>,
    snapshots: Vec<TileSnapshot>,
}

struct Recorder(Rc<RefCell<Seen>>);

impl MovementListener for Recorder {
    fn on_zoom_started(&mut self) {
        self.0.borrow_mut().log.push("started".into());
    }

    fn on_zoom_level_changed(&mut self, zoom: f32) {
        self.0.borrow_mut().log.push(format!("level {zoom:.1}"));
    }

    fn on_footprint_changed(&mut self, size: PixelSize) {
        self.0.borrow_mut().log.push(format!("footprint {size}"));
    }

    fn on_page_changed(&mut self, index: usize) {
        self.0.borrow_mut().log.push(format!("page {index}"));
    }

    fn on_tiles_updated(&mut self, tiles: &TileSnapshot) {
        self.0.borrow_mut().snapshots.push(*tiles);
    }
}

#[test]
fn listeners_see_frame_after_tiles_and_render() {
    let mut s = Session::new(2);
    let seen = Rc::new(RefCell::new(Seen::default()));
    let id = s.viewer.subscribe(Box::new(Recorder(seen.clone())));

    let (_, report) = s.frame(&scroll(CENTER, 1.0));

    let footprint = s.viewer.tiles().footprint().expect("footprint");
    assert_eq!(
        report.events,
        vec![
            ViewerEvent::Zoom(ZoomEvent::Started),
            ViewerEvent::Zoom(ZoomEvent::LevelChanged(1.1)),
            ViewerEvent::Tile(TileEvent::FootprintChanged(footprint)),
        ]
    );
    assert_eq!(s.viewer.tile_texture(TileKind::Detail).size(), Some(footprint));

    {
        let seen = seen.borrow();
        let expected =
            vec!["started".to_string(), "level 1.1".into(), format!("footprint {footprint}")];
        assert_eq!(seen.log, expected);
        assert_eq!(seen.snapshots.len(), 1);
        let detail = seen.snapshots[0].detail.expect("detail visible");
        assert_eq!(detail.rect(), s.viewer.tiles().detail().rect());
    }

    assert!(s.viewer.unsubscribe(id));
    s.viewer.go_to_page(1).expect("page 1");
    assert!(!seen.borrow().log.iter().any(|l| l.starts_with("page")));
}

#[test]
fn quiet_frames_do_not_notify() {
    let mut s = Session::new(1);
    let seen = Rc::new(RefCell::new(Seen::default()));
    s.viewer.subscribe(Box::new(Recorder(seen.clone())));

    s.idle(5);
    assert!(seen.borrow().snapshots.is_empty());
}
