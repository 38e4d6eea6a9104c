//! Calorie estimate from metabolic equivalents

use crate::analyzer::ExerciseType;

/// Rep volume can raise the estimate by at most this factor
const MAX_INTENSITY: f64 = 1.25;
const INTENSITY_PER_REP: f64 = 0.005;

/// Compendium-style MET value per exercise
pub fn met_value(exercise: ExerciseType) -> f64 {
    match exercise {
        ExerciseType::Squat => 5.0,
        ExerciseType::Lunge => 4.0,
        ExerciseType::PushUp => 3.8,
        ExerciseType::PullUp => 8.0,
        ExerciseType::CalfRaise => 2.8,
        ExerciseType::JumpSquat => 8.0,
        ExerciseType::Deadlift => 6.0,
        ExerciseType::WallSit => 3.0,
        ExerciseType::Plank => 3.8,
        ExerciseType::SidePlank => 3.0,
        ExerciseType::Bridge => 3.0,
        ExerciseType::SitUp => 3.8,
        ExerciseType::Crunch => 3.0,
        ExerciseType::Burpee => 8.0,
        ExerciseType::MountainClimber => 8.0,
        ExerciseType::JumpingJack => 7.7,
        ExerciseType::HighKnees => 8.0,
    }
}

/// kcal = MET × kg × hours, scaled up slightly with rep volume
pub fn estimate_calories(exercise: ExerciseType, body_weight_kg: f64, duration_ms: f64, reps: u32) -> f64 {
    let hours = duration_ms.max(0.0) / 3_600_000.0;
    let intensity = (1.0 + INTENSITY_PER_REP * f64::from(reps)).min(MAX_INTENSITY);
    met_value(exercise) * body_weight_kg * hours * intensity
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ten_minute_squats() {
        // 5.0 MET × 70 kg × 1/6 h × 1.1
        let kcal = estimate_calories(ExerciseType::Squat, 70.0, 600_000.0, 20);
        assert_relative_eq!(kcal, 64.166_666, epsilon = 1e-3);
    }

    #[test]
    fn intensity_is_capped() {
        let capped = estimate_calories(ExerciseType::Burpee, 60.0, 3_600_000.0, 1000);
        assert_relative_eq!(capped, 8.0 * 60.0 * 1.25);
    }

    #[test]
    fn negative_duration_burns_nothing() {
        assert_eq!(estimate_calories(ExerciseType::Plank, 70.0, -5.0, 3), 0.0);
    }
}
