//! Jumping jack analyzer
//!
//! Front view. Arms and feet must open and close together: arm abduction
//! (hip-shoulder-elbow) and foot spread, where spread is how much wider the
//! ankles are than the hips, in shoulder widths. Arms and feet disagreeing
//! is ambiguous and holds the phase.

use super::mean_angle;
use crate::analyzer::{
    confidence, AnalysisResult, CycleEvent, CyclePhase, ExerciseAnalyzer, ExerciseType, RepCycle,
    VisibilityGate,
};
use crate::geometry::horizontal_delta;
use crate::pose::{LandmarkFrame, LandmarkId, Side};

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 600.0;

pub const ARMS_OPEN: f32 = 120.0;
pub const ARMS_CLOSED: f32 = 60.0;
pub const SPREAD_OPEN: f32 = 0.3;
pub const SPREAD_CLOSED: f32 = 0.15;
/// Shoulder width above this means the athlete is too close to the camera
pub const MAX_SHOULDER_WIDTH: f32 = 0.45;
/// Shoulder width below this is a side-on view
const MIN_SHOULDER_WIDTH: f32 = 0.02;

const REQUIRED: [LandmarkId; 8] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftElbow,
    LandmarkId::RightElbow,
    LandmarkId::LeftHip,
    LandmarkId::RightHip,
    LandmarkId::LeftAnkle,
    LandmarkId::RightAnkle,
];

fn abduction_chain(side: Side) -> [LandmarkId; 3] {
    [side.hip(), side.shoulder(), side.elbow()]
}

fn width(frame: &LandmarkFrame, left: LandmarkId, right: LandmarkId) -> f32 {
    horizontal_delta(frame.point(right), frame.point(left)).abs()
}

pub struct JumpingJackAnalyzer {
    gate: VisibilityGate,
    cycle: RepCycle,
}

impl JumpingJackAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: RepCycle::new(COOLDOWN_MS),
        }
    }
}

impl Default for JumpingJackAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for JumpingJackAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::JumpingJack
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        if !self.gate.validate(frame, &REQUIRED) {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::JumpingJack,
                self.count(),
                "Face the camera with your whole body in view",
            );
        }
        let shoulders = width(frame, LandmarkId::LeftShoulder, LandmarkId::RightShoulder);
        if shoulders > MAX_SHOULDER_WIDTH {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::JumpingJack,
                self.count(),
                "Step back - you're too close to the camera",
            );
        }
        let conf = confidence(frame, &REQUIRED);
        if !(shoulders >= MIN_SHOULDER_WIDTH) {
            return AnalysisResult::ambiguous(ExerciseType::JumpingJack, self.count(), conf);
        }

        let arms = mean_angle(frame, &Side::BOTH, abduction_chain);
        let hips = width(frame, LandmarkId::LeftHip, LandmarkId::RightHip);
        let ankles = width(frame, LandmarkId::LeftAnkle, LandmarkId::RightAnkle);
        let spread = (ankles - hips) / shoulders;
        if !arms.is_finite() || !spread.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::JumpingJack, self.count(), conf);
        }

        let arms_open = arms >= ARMS_OPEN;
        let arms_closed = arms <= ARMS_CLOSED;
        let feet_open = spread >= SPREAD_OPEN;
        let feet_closed = spread <= SPREAD_CLOSED;
        if (arms_open && feet_closed) || (arms_closed && feet_open) {
            return AnalysisResult::ambiguous(ExerciseType::JumpingJack, self.count(), conf);
        }

        let event = self.cycle.step(arms_open && feet_open, arms_closed && feet_closed, now_ms);
        let counted = event == (CycleEvent::Completed { counted: true });
        // out of the closed stance but short of the open targets
        let partial = !counted
            && self.cycle.phase() == CyclePhase::Relaxed
            && !(arms_closed && feet_closed);

        let feedback = if counted {
            "Nice jack! Keep the rhythm"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted => "Bring your arms down and feet together",
                CyclePhase::Relaxed if arms_closed && feet_closed => "Jump out - arms overhead, feet wide",
                CyclePhase::Relaxed if !arms_open => "Raise your arms higher overhead",
                CyclePhase::Relaxed => "Jump your feet wider",
            }
        };

        AnalysisResult::new(ExerciseType::JumpingJack, self.count(), !partial, feedback, conf)
    }

    fn count(&self) -> u32 {
        self.cycle.count()
    }

    fn phase(&self) -> &'static str {
        match self.cycle.phase() {
            CyclePhase::Relaxed => "closed",
            CyclePhase::Contracted => "open",
        }
    }

    fn reset(&mut self) {
        self.cycle.reset();
    }
}
