//! Per-exercise analyzers
//!
//! Single-metric movements share `ThresholdCycle`; movements with several
//! signals (burpee, deadlift, jump squat, high knees, mountain climber) keep
//! a small state machine of their own; sit-up and crunch run on the
//! declarative `RepStateMachine`.

mod burpee;
mod calf_raise;
mod deadlift;
mod glute_bridge;
mod high_knees;
mod jump_squat;
mod jumping_jack;
mod lunge;
mod mountain_climber;
mod plank;
mod pull_up;
mod push_up;
mod side_plank;
mod squat;
mod trunk_flexion;
mod wall_sit;

pub use burpee::{BurpeeAnalyzer, BurpeeStage};
pub use calf_raise::CalfRaiseAnalyzer;
pub use deadlift::DeadliftAnalyzer;
pub use glute_bridge::BridgeAnalyzer;
pub use high_knees::HighKneesAnalyzer;
pub use jump_squat::{JumpSquatAnalyzer, JumpStage};
pub use jumping_jack::JumpingJackAnalyzer;
pub use lunge::LungeAnalyzer;
pub use mountain_climber::MountainClimberAnalyzer;
pub use plank::PlankAnalyzer;
pub use pull_up::PullUpAnalyzer;
pub use push_up::PushUpAnalyzer;
pub use side_plank::{SidePlankAnalyzer, SIDE_PLANK_BUCKET_SECONDS};
pub use squat::{SquatAnalyzer, SquatMetric};
pub use trunk_flexion::{FlexionSample, TrunkFlexionAnalyzer};
pub use wall_sit::WallSitAnalyzer;

use crate::analyzer::{ExerciseAnalyzer, ExerciseType, VisibilityGate};
use crate::geometry::{angle, average, inclination_from_vertical};
use crate::pose::{LandmarkFrame, LandmarkId, Side};

/// Build a fresh analyzer for `exercise`
pub fn create_analyzer(exercise: ExerciseType) -> Box<dyn ExerciseAnalyzer> {
    match exercise {
        ExerciseType::Squat => Box::new(SquatAnalyzer::new()),
        ExerciseType::Lunge => Box::new(LungeAnalyzer::new()),
        ExerciseType::PushUp => Box::new(PushUpAnalyzer::new()),
        ExerciseType::PullUp => Box::new(PullUpAnalyzer::new()),
        ExerciseType::CalfRaise => Box::new(CalfRaiseAnalyzer::new()),
        ExerciseType::JumpSquat => Box::new(JumpSquatAnalyzer::new()),
        ExerciseType::Deadlift => Box::new(DeadliftAnalyzer::new()),
        ExerciseType::WallSit => Box::new(WallSitAnalyzer::new()),
        ExerciseType::Bridge => Box::new(BridgeAnalyzer::new()),
        ExerciseType::Plank => Box::new(PlankAnalyzer::new()),
        ExerciseType::SidePlank => Box::new(SidePlankAnalyzer::new()),
        ExerciseType::SitUp => Box::new(TrunkFlexionAnalyzer::sit_up()),
        ExerciseType::Crunch => Box::new(TrunkFlexionAnalyzer::crunch()),
        ExerciseType::Burpee => Box::new(BurpeeAnalyzer::new()),
        ExerciseType::MountainClimber => Box::new(MountainClimberAnalyzer::new()),
        ExerciseType::JumpingJack => Box::new(JumpingJackAnalyzer::new()),
        ExerciseType::HighKnees => Box::new(HighKneesAnalyzer::new()),
    }
}

// Helpers shared by several analyzers

pub(crate) fn hip_knee_chain(side: Side) -> [LandmarkId; 2] {
    [side.hip(), side.knee()]
}

pub(crate) fn shoulder_hip_chain(side: Side) -> [LandmarkId; 2] {
    [side.shoulder(), side.hip()]
}

/// Torso lean from vertical on the clearest side, if one is visible
pub(crate) fn torso_lean(gate: &VisibilityGate, frame: &LandmarkFrame) -> Option<f32> {
    let side = gate.best_side(frame, shoulder_hip_chain)?;
    Some(inclination_from_vertical(frame.point(side.shoulder()), frame.point(side.hip())))
}

/// Mean angle at the middle joint of `chain` across `sides`
pub(crate) fn mean_angle(
    frame: &LandmarkFrame,
    sides: &[Side],
    chain: fn(Side) -> [LandmarkId; 3],
) -> f32 {
    let angles: Vec<f32> = sides
        .iter()
        .map(|&s| {
            let [a, b, c] = chain(s);
            angle(frame.point(a), frame.point(b), frame.point(c))
        })
        .collect();
    average(&angles)
}

/// Every landmark of `chain` on each of `sides`
pub(crate) fn chain_ids<const N: usize>(sides: &[Side], chain: fn(Side) -> [LandmarkId; N]) -> Vec<LandmarkId> {
    sides.iter().flat_map(|&s| chain(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{hide, standing};

    #[test]
    fn factory_builds_every_exercise() {
        for exercise in ExerciseType::ALL {
            let analyzer = create_analyzer(exercise);
            assert_eq!(analyzer.exercise_type(), exercise);
            assert_eq!(analyzer.count(), 0);
            assert_eq!(analyzer.category(), exercise.category());
        }
    }

    #[test]
    fn blank_frame_never_counts_or_panics() {
        let blank = LandmarkFrame::default();
        for exercise in ExerciseType::ALL {
            let mut analyzer = create_analyzer(exercise);
            for i in 0..10 {
                let r = analyzer.analyze(&blank, f64::from(i) * 33.0);
                assert_eq!(r.confidence, 0.0, "{exercise}");
                assert!(!r.is_correct_form, "{exercise}");
                assert!(!r.feedback.is_empty(), "{exercise}");
            }
            assert_eq!(analyzer.count(), 0, "{exercise}");
        }
    }

    #[test]
    fn torso_lean_needs_a_visible_side() {
        let gate = VisibilityGate::new(0.5);
        assert_eq!(torso_lean(&gate, &standing()), Some(0.0));
        let frame = hide(standing(), &[LandmarkId::LeftShoulder, LandmarkId::RightShoulder]);
        assert_eq!(torso_lean(&gate, &frame), None);
    }
}
