//! Property-based tests for rep counting.
//!
//! Random knee-angle sequences with random frame gaps, fed to every
//! analyzer through the factory.
//!
//! Run with: cargo test -p form-coach -- proptest

use form_coach::test_support::knees_at;
use form_coach::{create_analyzer, AnalysisResult, ExerciseType};
use proptest::prelude::*;

/// Knee angle plus the gap to the previous frame
fn arb_step() -> impl Strategy<Value = (f32, f64)> {
    (40.0f32..180.0, 0.0f64..400.0)
}

fn arb_exercise() -> impl Strategy<Value = ExerciseType> {
    prop::sample::select(ExerciseType::ALL.to_vec())
}

fn replay(exercise: ExerciseType, steps: &[(f32, f64)]) -> Vec<AnalysisResult> {
    let mut analyzer = create_analyzer(exercise);
    play(analyzer.as_mut(), steps)
}

fn play(analyzer: &mut dyn form_coach::ExerciseAnalyzer, steps: &[(f32, f64)]) -> Vec<AnalysisResult> {
    let mut now = 0.0;
    steps
        .iter()
        .map(|&(a, gap)| {
            now += gap;
            analyzer.analyze(&knees_at(a), now)
        })
        .collect()
}

proptest! {
    #[test]
    fn proptest_count_never_decreases(
        exercise in arb_exercise(),
        steps in prop::collection::vec(arb_step(), 1..120),
    ) {
        let results = replay(exercise, &steps);
        for pair in results.windows(2) {
            prop_assert!(pair[1].current_count >= pair[0].current_count);
            prop_assert!(pair[1].current_count - pair[0].current_count <= 1);
        }
    }

    #[test]
    fn proptest_results_are_well_formed(
        exercise in arb_exercise(),
        steps in prop::collection::vec(arb_step(), 1..60),
    ) {
        for r in replay(exercise, &steps) {
            prop_assert_eq!(r.exercise_type, exercise);
            prop_assert!((0.0..=1.0).contains(&r.confidence));
            prop_assert!(!r.feedback.is_empty());
        }
    }

    #[test]
    fn proptest_reset_is_deterministic(
        exercise in arb_exercise(),
        warmup in prop::collection::vec(arb_step(), 0..60),
        steps in prop::collection::vec(arb_step(), 1..60),
    ) {
        let mut analyzer = create_analyzer(exercise);
        play(analyzer.as_mut(), &warmup);
        analyzer.reset();
        prop_assert_eq!(analyzer.count(), 0);

        let after_reset = play(analyzer.as_mut(), &steps);
        prop_assert_eq!(after_reset, replay(exercise, &steps));
    }
}
