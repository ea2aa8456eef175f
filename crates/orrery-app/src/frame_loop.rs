//! Fixed-timestep frame loop.
//!
//! Camera controls advance in fixed 60 Hz steps drawn from an accumulator, so
//! damping and auto-rotation behave the same at any frame rate. The host
//! renders once per frame after the steps have run.

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time fed into the accumulator; slower frames are clamped.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state for the fixed-timestep loop.
///
/// Frame times are supplied by the caller: a windowed host measures them, the
/// headless viewer feeds [`FIXED_DT`] to get deterministic runs.
#[derive(Debug, Default)]
pub struct FrameLoop {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// `update_fn(fixed_dt, total_sim_time)` is called zero or more times at
    /// the fixed rate. Returns the interpolation alpha in `[0.0, 1.0)` for the
    /// render that follows.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> f64 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        // Tolerate rounding so a frame of exactly FIXED_DT always steps once.
        while self.accumulator >= FIXED_DT - 1e-12 {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator = (self.accumulator - FIXED_DT).max(0.0);
            self.update_count += 1;
        }

        self.frame_count += 1;
        self.alpha()
    }

    /// Interpolation alpha without running a tick.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
