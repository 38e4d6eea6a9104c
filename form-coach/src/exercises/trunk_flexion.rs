//! Sit-up and crunch analyzer
//!
//! Both movements flex the trunk toward the thighs and differ only in range
//! and pacing, so one analyzer runs on the declarative `RepStateMachine`
//! with per-movement thresholds. Every completed rep is kept with its
//! quality score.

use crate::analyzer::{
    confidence, torso_thigh_chain, AnalysisResult, ExerciseAnalyzer, ExerciseType, VisibilityGate,
    AMBIGUOUS_FEEDBACK,
};
use crate::geometry::angle;
use crate::pose::{LandmarkFrame, Side};
use crate::state_machine::{
    MachineEvent, MachineSample, MachineState, Rep, RepStateMachine, Transition, TransitionHook,
};

const VISIBILITY_FLOOR: f32 = 0.4;
/// Confidence needed to start a rep from READY
const START_CONFIDENCE: f32 = 0.4;
/// Dwell in CONTRACT before the rep may close
const MIN_CONTRACT_MS: f64 = 100.0;
/// Knee angle above this means the legs are too straight
const MAX_KNEE_ANGLE: f32 = 120.0;

pub const KNEES_BENT: &str = "Keep your knees bent";

/// One frame of trunk-flexion input for the state machine
#[derive(Clone, Debug, PartialEq)]
pub struct FlexionSample {
    /// Shoulder-hip-knee angle; smaller is more flexed
    pub flexion: f32,
    pub confidence: f32,
    pub errors: Vec<&'static str>,
}

impl FlexionSample {
    /// Stand-in for a frame that failed the visibility gate
    fn lost() -> Self {
        Self {
            flexion: f32::NAN,
            confidence: 0.0,
            errors: Vec::new(),
        }
    }
}

impl MachineSample for FlexionSample {
    fn confidence(&self) -> f32 {
        self.confidence
    }

    fn form_errors(&self) -> &[&'static str] {
        &self.errors
    }
}

fn transitions(contract: f32, relax: f32) -> Vec<Transition<FlexionSample>> {
    use MachineState::{Contract, Ready, Relax, Transition as Between};
    vec![
        Transition::new(Ready, Contract, move |s: &FlexionSample| s.flexion < contract)
            .min_confidence(START_CONFIDENCE)
            .on_transition(TransitionHook::OpenRep),
        Transition::new(Ready, Between, move |s: &FlexionSample| s.flexion < relax),
        Transition::new(Between, Contract, move |s: &FlexionSample| s.flexion < contract)
            .on_transition(TransitionHook::OpenRep),
        Transition::new(Between, Ready, move |s: &FlexionSample| s.flexion > relax),
        Transition::new(Contract, Relax, move |s: &FlexionSample| s.flexion > relax)
            .min_duration_ms(MIN_CONTRACT_MS)
            .on_transition(TransitionHook::CloseRep),
        Transition::new(Relax, Ready, |_: &FlexionSample| true),
    ]
}

pub struct TrunkFlexionAnalyzer {
    exercise: ExerciseType,
    gate: VisibilityGate,
    machine: RepStateMachine<FlexionSample>,
}

impl TrunkFlexionAnalyzer {
    /// Sit-up: curl below 120°, lie back past 150°
    pub fn sit_up() -> Self {
        Self::with_thresholds(ExerciseType::SitUp, 120.0, 150.0, 800.0)
    }

    /// Crunch: curl below 140°, lie back past 160°
    pub fn crunch() -> Self {
        Self::with_thresholds(ExerciseType::Crunch, 140.0, 160.0, 600.0)
    }

    fn with_thresholds(exercise: ExerciseType, contract: f32, relax: f32, cooldown_ms: f64) -> Self {
        Self {
            exercise,
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            machine: RepStateMachine::new(transitions(contract, relax), cooldown_ms),
        }
    }

    /// Completed reps with their quality, oldest first
    pub fn reps(&self) -> &[Rep] {
        self.machine.reps()
    }

    pub fn state(&self) -> MachineState {
        self.machine.state()
    }

    fn knee_errors(&self, frame: &LandmarkFrame, side: Side) -> Vec<&'static str> {
        if !self.gate.is_visible(frame, side.ankle()) {
            return Vec::new();
        }
        let knee = angle(
            frame.point(side.hip()),
            frame.point(side.knee()),
            frame.point(side.ankle()),
        );
        if knee > MAX_KNEE_ANGLE {
            vec![KNEES_BENT]
        } else {
            Vec::new()
        }
    }
}

impl ExerciseAnalyzer for TrunkFlexionAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        self.exercise
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let Some(side) = self.gate.best_side(frame, torso_thigh_chain) else {
            self.machine.update(&FlexionSample::lost(), now_ms);
            return AnalysisResult::insufficient_visibility(
                self.exercise,
                self.count(),
                "Lie side-on to the camera so your shoulders, hips and knees are visible",
            );
        };
        let conf = confidence(frame, &torso_thigh_chain(side));
        let flexion = angle(
            frame.point(side.shoulder()),
            frame.point(side.hip()),
            frame.point(side.knee()),
        );
        if !flexion.is_finite() {
            return AnalysisResult::ambiguous(self.exercise, self.count(), conf);
        }

        let sample = FlexionSample {
            flexion,
            confidence: conf,
            errors: self.knee_errors(frame, side),
        };
        let event = self.machine.update(&sample, now_ms);

        let feedback = match event {
            MachineEvent::RepCompleted(quality) => quality.message(),
            MachineEvent::RepDiscarded => "Slow down - control each rep",
            _ if !sample.errors.is_empty() => sample.errors[0],
            _ => match self.machine.state() {
                MachineState::Ready => "Curl up toward your knees",
                MachineState::Transition => "Keep curling up",
                MachineState::Contract => "Good! Now lower back down with control",
                MachineState::Relax => "Lower all the way down",
                MachineState::Error => AMBIGUOUS_FEEDBACK,
            },
        };

        AnalysisResult::new(self.exercise, self.count(), sample.errors.is_empty(), feedback, conf)
    }

    fn count(&self) -> u32 {
        self.machine.count()
    }

    fn phase(&self) -> &'static str {
        self.machine.state().as_str()
    }

    fn reset(&mut self) {
        self.machine.reset();
    }
}
