//! Frame timing for the animation engine.
//!
//! The engine's formulas are driven by absolute elapsed time rather than
//! per-frame deltas, which keeps them robust to irregular frame pacing: a
//! long frame cannot accumulate integration error in the deformation.
//! The delta is still tracked for the spring-based interpolators.
//!
//! # Example
//!
//! ```ignore
//! use liqmesh::time::Clock;
//!
//! let mut clock = Clock::new();
//!
//! // In the frame callback:
//! let (elapsed, delta) = clock.update();
//! engine.frame(elapsed, delta);
//! ```

use std::time::{Duration, Instant};

/// Monotonic animation clock.
///
/// Tracks elapsed time, per-frame delta, and a frame counter. Can be paused
/// (e.g. while the window is occluded) and can run with a fixed delta for
/// deterministic headless drives.
#[derive(Debug)]
pub struct Clock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds, excluding paused spans.
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Whether the clock is paused.
    paused: bool,
    /// Accumulated paused time.
    pause_elapsed: Duration,
    /// Fixed delta for deterministic updates (optional).
    fixed_delta: Option<f32>,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            pause_elapsed: Duration::ZERO,
            fixed_delta: None,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds. While paused, elapsed is
    /// frozen and delta is 0.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, 0.0);
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.last_frame = now;

        match self.fixed_delta {
            // Fixed-step mode: elapsed is the sum of fixed deltas, so a
            // headless drive replays identically regardless of wall time.
            Some(delta) => self.elapsed_secs += delta,
            None => {
                let raw_elapsed = now.duration_since(self.start) - self.pause_elapsed;
                self.elapsed_secs = raw_elapsed.as_secs_f32();
            }
        }

        self.frame_count += 1;
        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds, excluding paused spans.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Whether the clock is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze the clock. `elapsed()` stops increasing and `delta()` reads 0.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The paused span is excluded from elapsed time.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Use a fixed delta instead of wall-clock timing.
    ///
    /// Pass `None` to return to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Reset to a freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self {
            fixed_delta: self.fixed_delta,
            ..Self::new()
        };
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_clock_update() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_clock_pause() {
        let mut clock = Clock::new();
        clock.update();

        clock.pause();
        let elapsed_before = clock.elapsed();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = clock.update();

        assert_eq!(elapsed, elapsed_before);
        assert_eq!(delta, 0.0);
    }

    #[test]
    fn test_fixed_delta_is_deterministic() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(1.0 / 60.0));

        for _ in 0..60 {
            clock.update();
        }

        assert!((clock.elapsed() - 1.0).abs() < 1e-4);
        assert!((clock.delta() - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(clock.frame(), 60);
    }

    #[test]
    fn test_reset_keeps_fixed_delta() {
        let mut clock = Clock::new();
        clock.set_fixed_delta(Some(0.5));
        clock.update();
        clock.reset();

        assert_eq!(clock.frame(), 0);
        let (elapsed, delta) = clock.update();
        assert_eq!(delta, 0.5);
        assert_eq!(elapsed, 0.5);
    }
}
