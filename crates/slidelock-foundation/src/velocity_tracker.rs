//! Release velocity estimation for drag gestures.
//!
//! Uses the impulse strategy: each pair of neighbouring samples contributes
//! the kinetic energy needed to move from the previous velocity to its own,
//! and the accumulated energy is converted back into a velocity.

use smallvec::SmallVec;

/// Samples kept in the ring.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer paused; older samples
/// no longer describe the current motion.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Single-axis velocity tracker fed with absolute positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        if !position.is_finite() {
            return;
        }
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second, or 0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let window = self.recent_window();
        if window.len() < 2 {
            return 0.0;
        }

        // Oldest first.
        let mut work = 0.0f32;
        for (i, pair) in window.windows(2).rev().enumerate() {
            let (newer, older) = (pair[0], pair[1]);
            let dt = (newer.time_ms - older.time_ms) as f32;
            if dt <= 0.0 {
                continue;
            }
            let v_curr = (newer.position - older.position) / dt;
            let v_prev = kinetic_energy_to_velocity(work);
            work += (v_curr - v_prev) * v_curr.abs();
            if i == 0 {
                work *= 0.5;
            }
        }

        kinetic_energy_to_velocity(work) * 1000.0
    }

    /// [`calculate_velocity`](Self::calculate_velocity) clamped to
    /// `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Newest-first run of samples inside the horizon with no stop gaps.
    fn recent_window(&self) -> SmallVec<[Sample; HISTORY_SIZE]> {
        let mut window: SmallVec<[Sample; HISTORY_SIZE]> = SmallVec::new();
        let Some(newest) = self.samples[self.newest] else {
            return window;
        };
        let mut previous = newest;
        for step in 0..HISTORY_SIZE {
            let index = (self.newest + HISTORY_SIZE - step) % HISTORY_SIZE;
            let Some(sample) = self.samples[index] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            let gap = previous.time_ms - sample.time_ms;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS || gap < 0 {
                break;
            }
            window.push(sample);
            previous = sample;
        }
        window
    }
}

#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
