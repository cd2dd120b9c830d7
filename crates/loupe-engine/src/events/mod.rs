//! Notifications exchanged between controllers, the tile manager and the
//! render coordinator, plus the registry external observers subscribe to.
//!
//! Producers buffer into an [`EventQueue`]; the viewer drains the queues in a
//! fixed order each frame, so delivery never depends on who subscribed first.

mod listener;
mod queue;

pub use listener::{ListenerId, ListenerRegistry, MovementListener};
pub use queue::EventQueue;

use crate::coords::PixelSize;

/// Emitted by the pan controller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PanEvent {
    /// A drag is in progress; fired at most once per time slice.
    Ongoing,
    /// The drag ended. Fired exactly once per drag.
    Complete,
}

/// Emitted by the zoom controller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ZoomEvent {
    /// First scroll step after an idle period.
    Started,
    /// The zoom level changed; carries the new level.
    LevelChanged(f32),
    /// No scroll input for longer than the idle threshold.
    Complete,
}

/// Emitted by the tile manager.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TileEvent {
    /// The detail tile needs a backing buffer of a different size.
    FootprintChanged(PixelSize),
}

/// Every notification a frame can produce, in delivery order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewerEvent {
    Pan(PanEvent),
    Zoom(ZoomEvent),
    Tile(TileEvent),
    PageChanged(usize),
}

impl From<PanEvent> for ViewerEvent {
    fn from(ev: PanEvent) -> Self {
        ViewerEvent::Pan(ev)
    }
}

impl From<ZoomEvent> for ViewerEvent {
    fn from(ev: ZoomEvent) -> Self {
        ViewerEvent::Zoom(ev)
    }
}

impl From<TileEvent> for ViewerEvent {
    fn from(ev: TileEvent) -> Self {
        ViewerEvent::Tile(ev)
    }
}
