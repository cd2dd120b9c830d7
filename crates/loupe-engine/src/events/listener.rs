use crate::coords::PixelSize;
use crate::tiles::TileSnapshot;

use super::{PanEvent, TileEvent, ViewerEvent, ZoomEvent};

/// Observer of viewer notifications.
///
/// Every method has a no-op default; implement only what you need.
pub trait MovementListener {
    fn on_translation_ongoing(&mut self) {}

    fn on_translation_complete(&mut self) {}

    fn on_zoom_started(&mut self) {}

    fn on_zoom_level_changed(&mut self, zoom: f32) {
        let _ = zoom;
    }

    fn on_zoom_complete(&mut self) {}

    fn on_footprint_changed(&mut self, size: PixelSize) {
        let _ = size;
    }

    fn on_page_changed(&mut self, index: usize) {
        let _ = index;
    }

    /// Called once at the end of every frame that produced notifications.
    fn on_tiles_updated(&mut self, tiles: &TileSnapshot) {
        let _ = tiles;
    }
}

/// Handle returned by [`ListenerRegistry::register`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

/// Listeners in registration order.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, Box<dyn MovementListener>)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn MovementListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers one notification to every listener, in registration order.
    pub fn dispatch(&mut self, ev: &ViewerEvent) {
        for (_, listener) in &mut self.entries {
            match *ev {
                ViewerEvent::Pan(PanEvent::Ongoing) => listener.on_translation_ongoing(),
                ViewerEvent::Pan(PanEvent::Complete) => listener.on_translation_complete(),
                ViewerEvent::Zoom(ZoomEvent::Started) => listener.on_zoom_started(),
                ViewerEvent::Zoom(ZoomEvent::LevelChanged(z)) => listener.on_zoom_level_changed(z),
                ViewerEvent::Zoom(ZoomEvent::Complete) => listener.on_zoom_complete(),
                ViewerEvent::Tile(TileEvent::FootprintChanged(size)) => {
                    listener.on_footprint_changed(size)
                }
                ViewerEvent::PageChanged(index) => listener.on_page_changed(index),
            }
        }
    }

    pub fn tiles_updated(&mut self, snapshot: &TileSnapshot) {
        for (_, listener) in &mut self.entries {
            listener.on_tiles_updated(snapshot);
        }
    }
}
