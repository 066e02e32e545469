//! Fixed timestep clock
//!
//! Turns animation frame timestamps (ms) into whole simulation steps. The step period is read
//! per step, so a speed-up mid-frame applies to the remaining accumulated time.
//!
//! Time is kept in integer microseconds. Each timestamp is rounded once, so the deltas of any
//! split of an interval sum to exactly the same total.

const MICROS_PER_MS: u64 = 1000;

/// Accumulator for frame-driven fixed stepping
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    /// Previous frame timestamp (us)
    last_time: Option<i64>,
    /// Banked time (us)
    accumulator: u64,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed microseconds since the previous frame; 0 for the first frame after a reset
    pub fn delta(&mut self, now_ms: f64) -> u64 {
        let now = (now_ms * MICROS_PER_MS as f64).round() as i64;
        let dt = match self.last_time {
            Some(last) => now.saturating_sub(last).max(0) as u64,
            None => 0,
        };
        self.last_time = Some(now);
        dt
    }

    /// Bank elapsed microseconds for stepping
    pub fn accumulate(&mut self, dt_us: u64) {
        self.accumulator = self.accumulator.saturating_add(dt_us);
    }

    /// Take one step's worth of time if enough has accumulated
    pub fn consume(&mut self, step_ms: u32) -> bool {
        let step = u64::from(step_ms) * MICROS_PER_MS;
        if step > 0 && self.accumulator >= step {
            self.accumulator -= step;
            true
        } else {
            false
        }
    }

    /// Banked time not yet spent on steps (ms)
    pub fn pending(&self) -> f64 {
        self.accumulator as f64 / MICROS_PER_MS as f64
    }

    /// Forget the previous timestamp and any banked time
    pub fn reset(&mut self) {
        self.last_time = None;
        self.accumulator = 0;
    }
}
