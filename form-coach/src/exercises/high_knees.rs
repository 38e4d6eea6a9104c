//! High knees analyzer
//!
//! Knee height is measured as the knee's drop below the hip in torso
//! lengths, so it is independent of camera distance: about 0.8 standing,
//! near 0 with the thigh level. Every raise on the opposite leg from the
//! last counted one is a rep.

use crate::analyzer::{
    confidence, AnalysisResult, ExerciseAnalyzer, ExerciseType, RepCounter, VisibilityGate,
};
use crate::geometry::{distance, midpoint, vertical_delta};
use crate::pose::{LandmarkFrame, LandmarkId, Side};

const VISIBILITY_FLOOR: f32 = 0.5;
/// Minimum time between alternating raises
const COOLDOWN_MS: f64 = 300.0;

/// Knee drop at or below this is a raised knee
pub const RAISED_DROP: f32 = 0.25;
/// Knee drop at or above this is a planted leg
pub const PLANTED_DROP: f32 = 0.5;

const REQUIRED: [LandmarkId; 6] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftKnee,
    LandmarkId::RightKnee,
];

pub struct HighKneesAnalyzer {
    gate: VisibilityGate,
    counter: RepCounter,
    /// Leg raised on the previous frame
    raised: Option<Side>,
    last_counted: Option<Side>,
}

impl HighKneesAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            counter: RepCounter::new(COOLDOWN_MS),
            raised: None,
            last_counted: None,
        }
    }
}

impl Default for HighKneesAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for HighKneesAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::HighKnees
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        if !self.gate.validate(frame, &REQUIRED) {
            self.raised = None;
            return AnalysisResult::insufficient_visibility(
                ExerciseType::HighKnees,
                self.count(),
                "Step back so your shoulders, hips and knees are in view",
            );
        }
        let conf = confidence(frame, &REQUIRED);

        let torso = distance(
            midpoint(frame.point(LandmarkId::LeftShoulder), frame.point(LandmarkId::RightShoulder)),
            midpoint(frame.point(LandmarkId::LeftHip), frame.point(LandmarkId::RightHip)),
        );
        let [left, right] =
            Side::BOTH.map(|s| vertical_delta(frame.point(s.hip()), frame.point(s.knee())) / torso);
        if !left.is_finite() || !right.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::HighKnees, self.count(), conf);
        }

        let raised = if left <= RAISED_DROP && right >= PLANTED_DROP {
            Some(Side::Left)
        } else if right <= RAISED_DROP && left >= PLANTED_DROP {
            Some(Side::Right)
        } else {
            None
        };

        let mut counted = false;
        let mut repeated = false;
        if let Some(side) = raised.filter(|&s| self.raised != Some(s)) {
            if self.last_counted == Some(side) {
                repeated = true;
            } else if self.counter.try_increment(now_ms) {
                self.last_counted = Some(side);
                counted = true;
            }
        }
        self.raised = raised;

        let partial = raised.is_none() && left.min(right) < PLANTED_DROP && left.min(right) > RAISED_DROP;
        let feedback = if partial {
            "Drive your knee up to hip height".to_string()
        } else if repeated {
            "Alternate legs".to_string()
        } else if counted {
            "Good! Keep the pace up".to_string()
        } else if let Some(last) = self.last_counted {
            format!("Now the {} knee", last.opposite().name())
        } else {
            "Run in place, knees up to hip height".to_string()
        };

        AnalysisResult::new(ExerciseType::HighKnees, self.count(), !partial, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.counter.count()
    }

    fn phase(&self) -> &'static str {
        match self.raised {
            Some(Side::Left) => "left_up",
            Some(Side::Right) => "right_up",
            None => "neutral",
        }
    }

    fn reset(&mut self) {
        self.counter.reset();
        self.raised = None;
        self.last_counted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::test_support::{front_standing, set};

    fn knee_up(side: Side, drop: f32) -> LandmarkFrame {
        let frame = front_standing();
        let hip = frame.point(side.hip());
        // torso length in the front pose is 0.25
        set(frame, side.knee(), Point::new(hip.x, hip.y + drop * 0.25))
    }

    fn run(analyzer: &mut HighKneesAnalyzer, frames: &[LandmarkFrame], step_ms: f64) -> u32 {
        for (i, f) in frames.iter().enumerate() {
            analyzer.analyze(f, i as f64 * step_ms);
        }
        analyzer.count()
    }

    #[test]
    fn alternating_raises_each_count() {
        let mut knees = HighKneesAnalyzer::new();
        let n = front_standing();
        let frames = [n, knee_up(Side::Left, 0.1), n, knee_up(Side::Right, 0.1), n, knee_up(Side::Left, 0.1)];
        assert_eq!(run(&mut knees, &frames, 200.0), 3);
    }

    #[test]
    fn same_leg_again_does_not_count() {
        let mut knees = HighKneesAnalyzer::new();
        let n = front_standing();
        let frames = [n, knee_up(Side::Left, 0.1), n, knee_up(Side::Left, 0.1)];
        assert_eq!(run(&mut knees, &frames, 200.0), 1);
    }

    #[test]
    fn held_raise_counts_once() {
        let mut knees = HighKneesAnalyzer::new();
        let frames = [knee_up(Side::Left, 0.1); 10];
        assert_eq!(run(&mut knees, &frames, 100.0), 1);
        assert_eq!(knees.phase(), "left_up");
    }

    #[test]
    fn alternation_cooldown() {
        let mut knees = HighKneesAnalyzer::new();
        let frames = [knee_up(Side::Left, 0.1), knee_up(Side::Right, 0.1)];
        assert_eq!(run(&mut knees, &frames, 100.0), 1);
    }

    #[test]
    fn half_raise_is_coached() {
        let mut knees = HighKneesAnalyzer::new();
        let r = knees.analyze(&knee_up(Side::Left, 0.4), 0.0);
        assert!(!r.is_correct_form);
        assert!(r.feedback.contains("hip height"));
    }
}
