//! Glute bridge analyzer
//!
//! Two signals from a side view of the athlete lying on their back: the
//! shoulder-hip-knee line, and how far the hips have lifted from shoulder
//! height toward knee height (0 on the floor, 1 level with the knees).

use crate::analyzer::{
    confidence, torso_thigh_chain, AnalysisResult, CycleEvent, CyclePhase, ExerciseAnalyzer,
    ExerciseType, RepCycle, VisibilityGate,
};
use crate::geometry::{angle, in_range};
use crate::pose::{LandmarkFrame, Side};

const VISIBILITY_FLOOR: f32 = 0.4;
const COOLDOWN_MS: f64 = 1000.0;

pub const TOP_LINE: f32 = 165.0;
pub const TOP_LIFT: f32 = 0.6;
pub const BOTTOM_LINE: f32 = 150.0;
pub const BOTTOM_LIFT: f32 = 0.4;

/// Hips this far past knee height arch the lower back
const MAX_LIFT: f32 = 1.05;
/// Shoulder-knee height gap too small to normalize against
const MIN_SPAN: f32 = 0.02;
const SHIN_MIN: f32 = 70.0;
const SHIN_MAX: f32 = 110.0;

pub struct BridgeAnalyzer {
    gate: VisibilityGate,
    cycle: RepCycle,
}

impl BridgeAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: RepCycle::new(COOLDOWN_MS),
        }
    }

    fn knee_angle(&self, frame: &LandmarkFrame, side: Side) -> Option<f32> {
        self.gate.is_visible(frame, side.ankle()).then(|| {
            angle(frame.point(side.hip()), frame.point(side.knee()), frame.point(side.ankle()))
        })
    }
}

impl Default for BridgeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for BridgeAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Bridge
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let Some(side) = self.gate.best_side(frame, torso_thigh_chain) else {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::Bridge,
                self.count(),
                "Lie side-on to the camera so your shoulders, hips and knees are visible",
            );
        };
        let conf = confidence(frame, &torso_thigh_chain(side));

        let shoulder = frame.point(side.shoulder());
        let hip = frame.point(side.hip());
        let knee = frame.point(side.knee());
        let line = angle(shoulder, hip, knee);
        let span = shoulder.y - knee.y;
        if !line.is_finite() || !(span >= MIN_SPAN) {
            return AnalysisResult::ambiguous(ExerciseType::Bridge, self.count(), conf);
        }
        let lift = (shoulder.y - hip.y) / span;

        let at_top = line > TOP_LINE && lift > TOP_LIFT;
        let at_bottom = line < BOTTOM_LINE || lift < BOTTOM_LIFT;
        let event = self.cycle.step(at_top, at_bottom, now_ms);

        let arching = lift > MAX_LIFT;
        let shins_off = self.cycle.phase() == CyclePhase::Contracted
            && self.knee_angle(frame, side).is_some_and(|k| !in_range(k, SHIN_MIN, SHIN_MAX));

        let feedback = if arching {
            "Don't overarch - squeeze your glutes instead"
        } else if shins_off {
            "Adjust your feet so your shins are vertical at the top"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Nice bridge!"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted => "Squeeze at the top, then lower slowly",
                CyclePhase::Relaxed if at_bottom => "Drive through your heels and lift your hips",
                CyclePhase::Relaxed => "Lift higher - straight line from shoulders to knees",
            }
        };

        AnalysisResult::new(ExerciseType::Bridge, self.count(), !arching && !shins_off, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.cycle.count()
    }

    fn phase(&self) -> &'static str {
        match self.cycle.phase() {
            CyclePhase::Relaxed => "down",
            CyclePhase::Contracted => "up",
        }
    }

    fn reset(&mut self) {
        self.cycle.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::test_support::{lying, set};

    fn bridge_pose(hip: (f32, f32)) -> LandmarkFrame {
        Side::BOTH.into_iter().fold(lying(), |f, s| {
            let f = set(f, s.shoulder(), Point::new(0.20, 0.75));
            let f = set(f, s.hip(), Point::new(hip.0, hip.1));
            let f = set(f, s.knee(), Point::new(0.70, 0.55));
            set(f, s.ankle(), Point::new(0.75, 0.75))
        })
    }

    fn floor() -> LandmarkFrame {
        bridge_pose((0.50, 0.75))
    }

    fn top() -> LandmarkFrame {
        bridge_pose((0.525, 0.62))
    }

    #[test]
    fn counts_a_full_bridge() {
        let mut bridge = BridgeAnalyzer::new();
        bridge.analyze(&floor(), 0.0);
        let r = bridge.analyze(&top(), 800.0);
        assert_eq!(bridge.phase(), "up");
        assert!(r.is_correct_form);
        let r = bridge.analyze(&floor(), 1600.0);
        assert_eq!(r.current_count, 1);
    }

    #[test]
    fn half_lift_stays_down() {
        let mut bridge = BridgeAnalyzer::new();
        bridge.analyze(&bridge_pose((0.52, 0.68)), 0.0);
        assert_eq!(bridge.phase(), "down");
    }

    #[test]
    fn flat_span_is_ambiguous() {
        let mut bridge = BridgeAnalyzer::new();
        let flat = Side::BOTH.into_iter().fold(floor(), |f, s| set(f, s.knee(), Point::new(0.70, 0.75)));
        let r = bridge.analyze(&flat, 0.0);
        assert!(!r.is_correct_form);
        assert!(r.confidence > 0.0);
        assert_eq!(bridge.count(), 0);
    }
}
