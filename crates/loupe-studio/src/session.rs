//! Scripted gesture sessions.
//!
//! A session is a list of [`Step`]s expanded into per-frame input and played
//! against a viewer at a fixed frame rate.

use anyhow::Result;
use loupe_engine::coords::{Vec2, Viewport};
use loupe_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};
use loupe_engine::time::FrameClock;
use loupe_engine::{DocumentSource, Viewer};

/// Frames to wait after the last scroll notch so the zoom settles.
const SETTLE_FRAMES: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Frames with no input.
    Idle(usize),
    /// Left-drag in a straight line over `frames` frames.
    Drag { from: Vec2, to: Vec2, frames: usize },
    /// One scroll notch per frame at `at`; negative zooms out. Waits to settle.
    Zoom { at: Vec2, notches: i32 },
    /// Press and release a key.
    Key(Key),
    /// Hand the viewer to the snapshot callback.
    Snapshot(&'static str),
}

/// The session the studio replays when no other script is given.
///
/// Pans the page, zooms in off-center, pans while zoomed, zooms back out,
/// then moves to the next page.
pub fn builtin(display: Viewport) -> Vec<Step> {
    let (w, h) = (display.width, display.height);
    let center = Vec2::new(w * 0.5, h * 0.5);

    vec![
        Step::Idle(3),
        Step::Drag { from: center, to: center + Vec2::new(-w * 0.08, h * 0.05), frames: 30 },
        Step::Snapshot("overview"),
        Step::Zoom { at: Vec2::new(w * 0.62, h * 0.4), notches: 12 },
        Step::Drag { from: center, to: center + Vec2::new(w * 0.12, -h * 0.1), frames: 45 },
        Step::Idle(5),
        Step::Snapshot("zoomed"),
        Step::Zoom { at: center, notches: -12 },
        Step::Key(Key::BracketLeft),
        Step::Idle(3),
        Step::Snapshot("next-page"),
    ]
}

/// Totals for one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub frames: u64,
    pub notifications: usize,
    pub detail_renders: usize,
}

pub struct Player {
    clock: FrameClock,
    dt: f32,
    summary: Summary,
}

impl Player {
    pub fn new(fps: u32) -> Self {
        Self {
            clock: FrameClock::new(),
            dt: 1.0 / fps.max(1) as f32,
            summary: Summary::default(),
        }
    }

    /// Plays `steps`, calling `snapshot` at every [`Step::Snapshot`].
    pub fn play<D, F>(
        &mut self,
        viewer: &mut Viewer<D>,
        steps: &[Step],
        mut snapshot: F,
    ) -> Result<Summary>
    where
        D: DocumentSource,
        F: FnMut(&Viewer<D>, &str) -> Result<()>,
    {
        for step in steps {
            log::debug!("session: {step:?}");
            match *step {
                Step::Idle(frames) => {
                    for _ in 0..frames {
                        self.frame(viewer, &[]);
                    }
                }
                Step::Drag { from, to, frames } => self.drag(viewer, from, to, frames),
                Step::Zoom { at, notches } => {
                    let lines = notches.signum() as f32;
                    for _ in 0..notches.unsigned_abs() {
                        let notch = [
                            InputEvent::pointer_moved(at.x, at.y),
                            InputEvent::wheel_lines(lines),
                        ];
                        self.frame(viewer, &notch);
                    }
                    for _ in 0..SETTLE_FRAMES {
                        self.frame(viewer, &[]);
                    }
                }
                Step::Key(key) => {
                    self.frame(viewer, &[InputEvent::key_pressed(key)]);
                    let release = InputEvent::Key { key, state: KeyState::Released, repeat: false };
                    self.frame(viewer, &[release]);
                }
                Step::Snapshot(label) => snapshot(&*viewer, label)?,
            }
        }
        Ok(self.summary)
    }

    fn drag<D: DocumentSource>(
        &mut self,
        viewer: &mut Viewer<D>,
        from: Vec2,
        to: Vec2,
        frames: usize,
    ) {
        let press =
            InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, from.x, from.y);
        self.frame(viewer, &[press]);

        let frames = frames.max(1);
        for i in 1..=frames {
            let t = i as f32 / frames as f32;
            let p = from + (to - from) * t;
            self.frame(viewer, &[InputEvent::pointer_moved(p.x, p.y)]);
        }

        let release = InputEvent::button(MouseButton::Left, MouseButtonState::Released, to.x, to.y);
        self.frame(viewer, &[release]);
    }

    fn frame<D: DocumentSource>(&mut self, viewer: &mut Viewer<D>, input: &[InputEvent]) {
        for ev in input {
            viewer.apply_event(ev.clone());
        }

        let time = self.clock.step(self.dt);
        let report = viewer.frame(&time);

        self.summary.frames += 1;
        self.summary.notifications += report.events.len();
        if report.rendered.is_some() {
            self.summary.detail_renders += 1;
        }
    }
}
