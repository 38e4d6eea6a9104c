//! Vertical velocity tracking with dead zone
//!
//! Tracks recent (timestamp, height) samples of one body point and reports
//! its vertical speed in normalized units per second. Used to spot the
//! take-off of a jump.

use std::collections::VecDeque;

/// Number of sample intervals averaged for the velocity
pub const VELOCITY_FRAMES: usize = 3;

/// Speed below this (units/s) is treated as zero (filters jitter)
pub const DEAD_ZONE: f32 = 0.05;

/// Vertical velocity tracker with sample history
#[derive(Clone, Debug, Default)]
pub struct VerticalVelocity {
    /// Ring buffer of recent (time_ms, y) samples
    history: VecDeque<(f64, f32)>,
}

impl VerticalVelocity {
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(VELOCITY_FRAMES + 2),
        }
    }

    /// Add a sample, returns upward speed (positive = rising on screen)
    ///
    /// Image y grows downward, so a rising hip has decreasing y.
    pub fn update(&mut self, now_ms: f64, y: f32) -> f32 {
        if let Some(&(last_t, _)) = self.history.back() {
            if now_ms <= last_t {
                return self.upward_speed();
            }
        }

        self.history.push_back((now_ms, y));
        if self.history.len() > VELOCITY_FRAMES + 1 {
            self.history.pop_front();
        }

        self.upward_speed()
    }

    /// Upward speed across the buffered window, in units per second
    pub fn upward_speed(&self) -> f32 {
        let (Some(&(t0, y0)), Some(&(t1, y1))) = (self.history.front(), self.history.back()) else {
            return 0.0;
        };
        if self.history.len() < 2 {
            return 0.0;
        }

        let dt_s = ((t1 - t0) / 1000.0) as f32;
        let speed = (y0 - y1) / dt_s;

        if speed.abs() < DEAD_ZONE {
            0.0
        } else {
            speed
        }
    }

    /// Clear history (useful on reset)
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
