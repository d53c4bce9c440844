//! Frame timing utilities.
//!
//! `Time` is produced once per frame by a clock and handed to the frame
//! driver.  The controllers only ever see plain numbers taken from it: the
//! frame delta in seconds and `now_ms()` for input-recency tracking.
//!
//! Two clocks are provided.  [`TimeClock`] follows the wall clock and is what
//! an interactive loop uses; [`FixedClock`] advances by a constant step and
//! keeps headless runs and tests deterministic.
//!
//! # Example
//! ```rust,ignore
//! let mut clock = FixedClock::new(1.0 / 60.0);
//! let time = clock.tick();
//! locomotion.update(time.delta);
//! camera.update(time.delta, body, time.now_ms());
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Largest delta a clock will report, in seconds.  Slow frames are capped
/// at the equivalent of 30 fps so a stall never turns into a lane jump.
pub const MAX_FRAME_DELTA: f32 = 1.0 / 30.0;

/// A snapshot of timing information for the current frame.
///
/// `Copy`, so the driver passes it by value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous frame, clamped to
    /// `[0, MAX_FRAME_DELTA]` by the clocks in this module.
    pub delta: f32,

    /// Total seconds elapsed since the clock started.
    pub elapsed: f64,

    /// Number of frames produced so far (0 for the first frame).
    pub frame_count: u64,

    /// Instantaneous frames-per-second derived from `delta`.
    pub fps: f32,
}

impl Time {
    /// Monotonic timestamp of this frame in milliseconds.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.elapsed * 1000.0
    }

    /// Returns the delta time clamped to `[0, max_dt]`.
    #[inline]
    pub fn clamped_delta(&self, max_dt: f32) -> f32 {
        self.delta.clamp(0.0, max_dt)
    }

    fn from_parts(delta: f32, elapsed: f64, frame_count: u64) -> Self {
        let fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };
        Self { delta, elapsed, frame_count, fps }
    }
}

// ─── Wall clock ────────────────────────────────────────────────────────────

/// Stateful timer that produces [`Time`] snapshots from the wall clock.
///
/// The loop creates one at startup and calls `tick()` at the beginning of
/// every frame.
pub struct TimeClock {
    start:       Instant,
    last_tick:   Instant,
    frame_count: u64,
}

impl TimeClock {
    /// Create a new clock, starting the epoch now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start:       now,
            last_tick:   now,
            frame_count: 0,
        }
    }

    /// Return the current [`Time`] snapshot without advancing the clock.
    pub fn peek(&self) -> Time {
        let now     = Instant::now();
        let delta   = (now - self.last_tick).as_secs_f32().min(MAX_FRAME_DELTA);
        let elapsed = (now - self.start).as_secs_f64();
        Time::from_parts(delta, elapsed, self.frame_count)
    }

    /// Advance by one frame.  Returns the [`Time`] snapshot for this frame.
    pub fn tick(&mut self) -> Time {
        let time = self.peek();
        self.last_tick    = Instant::now();
        self.frame_count += 1;
        time
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Fixed-step clock ──────────────────────────────────────────────────────

/// Clock that advances by exactly `step` seconds per tick.
///
/// `elapsed` is accumulated in `f64` so long runs don't drift.
#[derive(Debug, Clone)]
pub struct FixedClock {
    step:        f32,
    elapsed:     f64,
    frame_count: u64,
}

impl FixedClock {
    /// `step` is clamped to `[0, MAX_FRAME_DELTA]`; NaN becomes 0.
    pub fn new(step: f32) -> Self {
        let clamped = if step.is_nan() { 0.0 } else { step.clamp(0.0, MAX_FRAME_DELTA) };
        if clamped != step {
            log::warn!("fixed step {step} s clamped to {clamped} s");
        }
        Self { step: clamped, elapsed: 0.0, frame_count: 0 }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Advance by one step and return the snapshot for the new frame.
    pub fn tick(&mut self) -> Time {
        self.elapsed += f64::from(self.step);
        let time = Time::from_parts(self.step, self.elapsed, self.frame_count);
        self.frame_count += 1;
        time
    }
}
