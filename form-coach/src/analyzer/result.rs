//! Per-frame analysis output

use serde::{Deserialize, Serialize};

use super::ExerciseType;

/// Generic set-up guidance for frames whose geometry does not classify
pub const AMBIGUOUS_FEEDBACK: &str = "Hold your starting position so the movement can be tracked";

/// Verdict for one frame, built fresh every call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub exercise_type: ExerciseType,
    pub current_count: u32,
    pub is_correct_form: bool,
    pub feedback: String,
    pub confidence: f32,
}

impl AnalysisResult {
    pub fn new(
        exercise_type: ExerciseType,
        current_count: u32,
        is_correct_form: bool,
        feedback: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            exercise_type,
            current_count,
            is_correct_form,
            feedback: feedback.into(),
            confidence: if confidence.is_finite() {
                confidence.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    /// Required landmarks missing or below the visibility floor
    pub fn insufficient_visibility(
        exercise_type: ExerciseType,
        current_count: u32,
        feedback: impl Into<String>,
    ) -> Self {
        Self::new(exercise_type, current_count, false, feedback, 0.0)
    }

    /// Landmarks visible but the metric did not classify cleanly
    pub fn ambiguous(exercise_type: ExerciseType, current_count: u32, confidence: f32) -> Self {
        Self::new(exercise_type, current_count, false, AMBIGUOUS_FEEDBACK, confidence)
    }

    /// True for frames rejected on visibility (nothing was measured)
    pub fn is_visibility_error(&self) -> bool {
        self.confidence <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        let r = AnalysisResult::new(ExerciseType::Squat, 0, true, "ok", 1.4);
        assert_eq!(r.confidence, 1.0);
        let r = AnalysisResult::new(ExerciseType::Squat, 0, true, "ok", f32::NAN);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn visibility_error_has_zero_confidence() {
        let r = AnalysisResult::insufficient_visibility(ExerciseType::Plank, 3, "Step back");
        assert!(!r.is_correct_form);
        assert!(r.is_visibility_error());
        assert_eq!(r.current_count, 3);
    }

    #[test]
    fn serializes_camel_case() {
        let r = AnalysisResult::new(ExerciseType::PushUp, 2, false, "Lower your chest", 0.8);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["exerciseType"], "push_up");
        assert_eq!(json["currentCount"], 2);
        assert_eq!(json["isCorrectForm"], false);
        assert_eq!(json["feedback"], "Lower your chest");
    }
}
