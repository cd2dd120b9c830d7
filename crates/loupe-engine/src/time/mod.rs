//! Time subsystem.
//!
//! Provides stable, testable frame timing without coupling to a runtime.
//! - live hosts call `tick()` once per presented frame
//! - replay and tests call `step(dt)` for a fixed, deterministic delta

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
