use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame, in seconds.
    pub dt: f32,

    /// Time elapsed since the clock started, in seconds.
    pub elapsed: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Builds a snapshot directly; useful for hosts that keep their own clock.
    pub const fn new(dt: f32, elapsed: f64, frame_index: u64) -> Self {
        Self { dt, elapsed, frame_index }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time from `tick()` is clamped to avoid pathological values when the
/// host is paused by a debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the wall-clock baseline without touching elapsed time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances by real time since the previous tick.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.advance(dt.as_secs_f32())
    }

    /// Advances by a fixed delta, ignoring the wall clock and clamps.
    pub fn step(&mut self, dt: f32) -> FrameTime {
        self.advance(dt.max(0.0))
    }

    fn advance(&mut self, dt: f32) -> FrameTime {
        self.elapsed += dt as f64;

        let ft = FrameTime {
            dt,
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
