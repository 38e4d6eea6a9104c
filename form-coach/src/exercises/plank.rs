//! Plank analyzer
//!
//! No repetitions: the count is whole seconds held with the shoulders
//! stacked over the elbows and the body in a straight line.

use crate::analyzer::{
    confidence, AnalysisResult, ExerciseAnalyzer, ExerciseType, HoldTimer, VisibilityGate,
};
use crate::geometry::{angle, in_range};
use crate::pose::{LandmarkFrame, LandmarkId, Side};

const VISIBILITY_FLOOR: f32 = 0.4;

/// Elbow-shoulder-hip window for shoulders stacked over the elbows
pub const SHOULDER_MIN: f32 = 80.0;
pub const SHOULDER_MAX: f32 = 100.0;
pub const MIN_BODY_LINE: f32 = 160.0;

fn plank_chain(side: Side) -> [LandmarkId; 4] {
    [side.elbow(), side.shoulder(), side.hip(), side.ankle()]
}

pub struct PlankAnalyzer {
    gate: VisibilityGate,
    hold: HoldTimer,
}

impl PlankAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            hold: HoldTimer::new(),
        }
    }

    pub fn held_ms(&self) -> f64 {
        self.hold.held_ms()
    }
}

impl Default for PlankAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for PlankAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Plank
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let Some(side) = self.gate.best_side(frame, plank_chain) else {
            self.hold.update(false, now_ms);
            return AnalysisResult::insufficient_visibility(
                ExerciseType::Plank,
                self.count(),
                "Set the camera side-on so your whole body is visible",
            );
        };
        let conf = confidence(frame, &plank_chain(side));

        let shoulder = angle(
            frame.point(side.elbow()),
            frame.point(side.shoulder()),
            frame.point(side.hip()),
        );
        let line = angle(
            frame.point(side.shoulder()),
            frame.point(side.hip()),
            frame.point(side.ankle()),
        );
        if !shoulder.is_finite() || !line.is_finite() {
            self.hold.update(false, now_ms);
            return AnalysisResult::ambiguous(ExerciseType::Plank, self.count(), conf);
        }

        let stacked = in_range(shoulder, SHOULDER_MIN, SHOULDER_MAX);
        let straight = line >= MIN_BODY_LINE;
        let holding = stacked && straight;
        self.hold.update(holding, now_ms);

        let hips_high = frame.point(side.hip()).y < frame.point(side.shoulder()).y;
        let feedback = if !straight && hips_high {
            "Lower your hips in line with your shoulders"
        } else if !straight {
            "Lift your hips - keep a straight line from head to heels"
        } else if !stacked {
            "Stack your shoulders directly over your elbows"
        } else {
            "Great plank! Keep breathing and hold"
        };

        AnalysisResult::new(ExerciseType::Plank, self.count(), holding, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.hold.held_seconds()
    }

    fn phase(&self) -> &'static str {
        if self.hold.is_holding() {
            "holding"
        } else {
            "resting"
        }
    }

    fn reset(&mut self) {
        self.hold.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::test_support::{plank, set};

    fn sag(frame: LandmarkFrame, y: f32) -> LandmarkFrame {
        Side::BOTH.into_iter().fold(frame, |f, s| set(f, s.hip(), Point::new(0.55, y)))
    }

    #[test]
    fn counts_seconds_in_form() {
        let mut analyzer = PlankAnalyzer::new();
        for i in 0..=100 {
            analyzer.analyze(&plank(), f64::from(i) * 50.0);
        }
        assert_eq!(analyzer.count(), 5);
        assert_eq!(analyzer.phase(), "holding");
    }

    #[test]
    fn sagging_hips_stop_the_clock() {
        let mut analyzer = PlankAnalyzer::new();
        analyzer.analyze(&plank(), 0.0);
        analyzer.analyze(&plank(), 1000.0);
        let r = analyzer.analyze(&sag(plank(), 0.62), 1500.0);
        assert!(!r.is_correct_form);
        assert!(r.feedback.contains("Lift your hips"));
        analyzer.analyze(&sag(plank(), 0.62), 3000.0);
        assert_eq!(analyzer.count(), 1);
        assert_eq!(analyzer.phase(), "resting");
    }

    #[test]
    fn piked_hips_are_called_out() {
        let mut analyzer = PlankAnalyzer::new();
        let r = analyzer.analyze(&sag(plank(), 0.38), 0.0);
        assert!(r.feedback.contains("Lower your hips"));
    }
}
