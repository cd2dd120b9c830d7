use crate::camera::ViewportState;
use crate::coords::{Rect, Vec2};
use crate::events::{EventQueue, ZoomEvent};
use crate::time::FrameTime;

/// Turns scroll input into discrete, cursor-anchored zoom steps.
///
/// The level is tracked as a whole number of steps above 1, so returning to
/// level 1 is exact no matter how many steps were taken in between.
#[derive(Debug)]
pub struct ZoomController {
    steps: u32,
    step: f32,
    /// Seconds without scroll input before `Complete` fires.
    idle_threshold: f64,
    /// Elapsed time of the last scroll step; `None` when settled.
    last_scroll: Option<f64>,
    /// World point under the cursor when it is over the document.
    anchor: Option<Vec2>,
    events: EventQueue<ZoomEvent>,
}

impl ZoomController {
    pub fn new(step: f32, idle_threshold: f64) -> Self {
        Self {
            steps: 0,
            step,
            idle_threshold,
            last_scroll: None,
            anchor: None,
            events: EventQueue::new(),
        }
    }

    /// Current multiplicative zoom level, always ≥ 1.
    #[inline]
    pub fn level(&self) -> f32 {
        1.0 + self.steps as f32 * self.step
    }

    /// Whether scroll input arrived within the idle threshold.
    #[inline]
    pub fn is_zooming(&self) -> bool {
        self.last_scroll.is_some()
    }

    /// World point under the cursor as of the last update, if it hit `surface`.
    #[inline]
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Runs one frame of zoom handling.
    ///
    /// `scroll` is this frame's vertical wheel movement in lines; only its sign
    /// matters. `surface` is the document's world rectangle, used to resolve
    /// the anchor under the cursor.
    pub fn update(
        &mut self,
        time: &FrameTime,
        pointer: Option<Vec2>,
        scroll: f32,
        view: &mut ViewportState,
        surface: Rect,
    ) {
        self.anchor = pointer
            .map(|p| view.screen_to_world(p))
            .filter(|w| surface.contains(*w));

        if scroll != 0.0 && scroll.is_finite() {
            if self.last_scroll.is_none() {
                self.events.push(ZoomEvent::Started);
                log::debug!("zoom: started at level {}", self.level());
            }

            if scroll > 0.0 {
                self.steps += 1;
            } else {
                self.steps = self.steps.saturating_sub(1);
            }

            let level = self.level();
            let cursor = pointer.unwrap_or_else(|| {
                Vec2::new(view.display.width * 0.5, view.display.height * 0.5)
            });
            Self::apply(level, cursor, view);

            self.events.push(ZoomEvent::LevelChanged(level));
            self.last_scroll = Some(time.elapsed);
        } else if let Some(last) = self.last_scroll {
            if time.elapsed - last > self.idle_threshold {
                self.last_scroll = None;
                self.events.push(ZoomEvent::Complete);
                log::debug!("zoom: complete at level {}", self.level());
            }
        }
    }

    /// Zooms to `level` keeping the world point under `cursor` fixed on screen.
    fn apply(level: f32, cursor: Vec2, view: &mut ViewportState) {
        let before = view.screen_to_world(cursor);
        view.set_zoom(level);
        let after = view.screen_to_world(cursor);
        view.center += before - after;
    }

    /// Back to level 1, settled, without notifying.
    pub fn reset(&mut self, view: &mut ViewportState) {
        self.steps = 0;
        self.last_scroll = None;
        self.anchor = None;
        self.events.clear();
        view.set_zoom(1.0);
    }

    pub fn events_mut(&mut self) -> &mut EventQueue<ZoomEvent> {
        &mut self.events
    }
}
