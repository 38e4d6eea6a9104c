//! Hold timer for isometric exercises
//!
//! Accumulates time only across consecutive frames in a valid hold. A gap
//! longer than `MAX_FRAME_GAP_MS` (tab in background, tracking lost) is not
//! credited.

/// Longest gap between two valid frames that still counts as held time
pub const MAX_FRAME_GAP_MS: f64 = 1000.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HoldTimer {
    held_ms: f64,
    /// Timestamp of the previous frame, if it was a valid hold
    last_valid_ms: Option<f64>,
}

impl HoldTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame; returns total held time in ms
    pub fn update(&mut self, holding: bool, now_ms: f64) -> f64 {
        if !holding {
            self.last_valid_ms = None;
            return self.held_ms;
        }

        if let Some(last) = self.last_valid_ms {
            let dt = now_ms - last;
            if dt > 0.0 && dt <= MAX_FRAME_GAP_MS {
                self.held_ms += dt;
            }
        }
        self.last_valid_ms = Some(now_ms);
        self.held_ms
    }

    pub fn held_ms(&self) -> f64 {
        self.held_ms
    }

    /// Whole seconds held
    pub fn held_seconds(&self) -> u32 {
        (self.held_ms / 1000.0).floor() as u32
    }

    pub fn is_holding(&self) -> bool {
        self.last_valid_ms.is_some()
    }

    pub fn reset(&mut self) {
        self.held_ms = 0.0;
        self.last_valid_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_consecutive_valid_frames() {
        let mut timer = HoldTimer::new();
        for i in 0..=30 {
            timer.update(true, f64::from(i) * 100.0);
        }
        assert_eq!(timer.held_ms(), 3000.0);
        assert_eq!(timer.held_seconds(), 3);
    }

    #[test]
    fn broken_hold_does_not_credit_the_gap() {
        let mut timer = HoldTimer::new();
        timer.update(true, 0.0);
        timer.update(true, 500.0);
        timer.update(false, 600.0);
        timer.update(true, 900.0);
        timer.update(true, 1000.0);
        assert_eq!(timer.held_ms(), 600.0);
    }

    #[test]
    fn long_gap_is_not_credited() {
        let mut timer = HoldTimer::new();
        timer.update(true, 0.0);
        timer.update(true, 5000.0);
        assert_eq!(timer.held_ms(), 0.0);
        assert!(timer.is_holding());
    }
}
