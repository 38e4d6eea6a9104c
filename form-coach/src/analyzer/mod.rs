//! Analyzer contract - what every exercise analyzer provides
//!
//! Shared pieces (visibility gating, confidence, debounced counting, hold
//! timing) live here once; the per-exercise logic lives in `exercises`.

mod counter;
mod exercise;
mod gate;
mod hold;
mod result;

pub use counter::{CycleEvent, CyclePhase, RepCounter, RepCycle, Threshold, ThresholdCycle};
pub use exercise::{ExerciseCategory, ExerciseType};
pub use gate::{
    arm_chain, body_line_chain, confidence, leg_chain, torso_thigh_chain, VisibilityGate,
};
pub use hold::{HoldTimer, MAX_FRAME_GAP_MS};
pub use result::{AnalysisResult, AMBIGUOUS_FEEDBACK};

use crate::pose::LandmarkFrame;

/// Per-frame form analysis for one exercise
///
/// Implementations own their phase/count state and mutate it only inside
/// `analyze`. Low visibility is answered with a zero-confidence result,
/// never a panic, and never changes the count.
pub trait ExerciseAnalyzer {
    fn exercise_type(&self) -> ExerciseType;

    fn category(&self) -> ExerciseCategory {
        self.exercise_type().category()
    }

    /// Classify one frame. `now_ms` is the caller's frame timestamp.
    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult;

    /// Completed reps (or held seconds / time buckets for timed holds)
    fn count(&self) -> u32;

    /// Current phase label, for diagnostics and UI hints
    fn phase(&self) -> &'static str;

    /// Phase back to initial, count to zero, history cleared
    fn reset(&mut self);
}
