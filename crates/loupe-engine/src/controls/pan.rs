use crate::camera::ViewportState;
use crate::coords::Vec2;
use crate::events::{EventQueue, PanEvent};

#[derive(Debug, Copy, Clone, PartialEq)]
enum PanState {
    Idle,
    /// `previous` is `None` until the first sample of the drag arrives.
    Dragging { previous: Option<Vec2> },
}

/// Turns pointer drags into camera translation.
///
/// Idle → Dragging when a drag starts over the document surface, back to Idle
/// on release. Translation is inverted: the camera moves against the drag,
/// so the page stays under the pointer.
#[derive(Debug)]
pub struct PanController {
    state: PanState,
    /// Seconds between `Ongoing` notifications.
    slice: f32,
    slice_timer: f32,
    events: EventQueue<PanEvent>,
}

impl PanController {
    pub fn new(slice: f32) -> Self {
        Self {
            state: PanState::Idle,
            slice,
            slice_timer: 0.0,
            events: EventQueue::new(),
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PanState::Dragging { .. })
    }

    /// Starts a drag when `hit` reports the pointer is over the document.
    ///
    /// Returns whether a drag is now in progress. A press on other geometry
    /// is ignored.
    pub fn begin_drag(&mut self, hit: bool) -> bool {
        if self.is_dragging() {
            return true;
        }
        if !hit {
            return false;
        }

        self.state = PanState::Dragging { previous: None };
        self.slice_timer = 0.0;
        log::trace!("pan: drag started");
        true
    }

    /// Feeds one pointer sample and translates the camera.
    ///
    /// The first sample of a drag only records the reference position. Both
    /// samples are projected through the same camera state, so the delta is
    /// free of any offset from the camera having moved in between.
    ///
    /// Returns the world-space translation applied, if any.
    pub fn drag_to(&mut self, screen: Vec2, view: &mut ViewportState) -> Option<Vec2> {
        let PanState::Dragging { previous } = &mut self.state else {
            return None;
        };

        let prev = previous.replace(screen)?;

        let current_world = view.screen_to_world(screen);
        let previous_world = view.screen_to_world(prev);
        let delta = -(current_world - previous_world);

        view.center += delta;
        Some(delta)
    }

    /// Ends the drag, emitting `Complete` if one was in progress.
    pub fn end_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }

        self.state = PanState::Idle;
        self.slice_timer = 0.0;
        self.events.push(PanEvent::Complete);
        log::trace!("pan: drag complete");
        true
    }

    /// Advances the `Ongoing` timer by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if !self.is_dragging() {
            return;
        }

        self.slice_timer += dt;
        if self.slice_timer >= self.slice {
            self.slice_timer = 0.0;
            self.events.push(PanEvent::Ongoing);
        }
    }

    /// Drops any drag in progress without notifying.
    pub fn reset(&mut self) {
        self.state = PanState::Idle;
        self.slice_timer = 0.0;
        self.events.clear();
    }

    pub fn events_mut(&mut self) -> &mut EventQueue<PanEvent> {
        &mut self.events
    }
}
