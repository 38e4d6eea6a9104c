//! Exercise identity and category

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Exercises with a dedicated analyzer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Squat,
    Lunge,
    PushUp,
    PullUp,
    CalfRaise,
    JumpSquat,
    Deadlift,
    WallSit,
    Bridge,
    Plank,
    SidePlank,
    SitUp,
    Crunch,
    Burpee,
    MountainClimber,
    JumpingJack,
    HighKnees,
}

/// Coarse grouping used by the client for filtering and summaries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    LowerBody,
    UpperBody,
    Core,
    Cardio,
    FullBody,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 17] = [
        ExerciseType::Squat,
        ExerciseType::Lunge,
        ExerciseType::PushUp,
        ExerciseType::PullUp,
        ExerciseType::CalfRaise,
        ExerciseType::JumpSquat,
        ExerciseType::Deadlift,
        ExerciseType::WallSit,
        ExerciseType::Bridge,
        ExerciseType::Plank,
        ExerciseType::SidePlank,
        ExerciseType::SitUp,
        ExerciseType::Crunch,
        ExerciseType::Burpee,
        ExerciseType::MountainClimber,
        ExerciseType::JumpingJack,
        ExerciseType::HighKnees,
    ];

    /// Stable wire name (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "squat",
            ExerciseType::Lunge => "lunge",
            ExerciseType::PushUp => "push_up",
            ExerciseType::PullUp => "pull_up",
            ExerciseType::CalfRaise => "calf_raise",
            ExerciseType::JumpSquat => "jump_squat",
            ExerciseType::Deadlift => "deadlift",
            ExerciseType::WallSit => "wall_sit",
            ExerciseType::Bridge => "bridge",
            ExerciseType::Plank => "plank",
            ExerciseType::SidePlank => "side_plank",
            ExerciseType::SitUp => "sit_up",
            ExerciseType::Crunch => "crunch",
            ExerciseType::Burpee => "burpee",
            ExerciseType::MountainClimber => "mountain_climber",
            ExerciseType::JumpingJack => "jumping_jack",
            ExerciseType::HighKnees => "high_knees",
        }
    }

    /// Human-readable name for UI labels
    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "Squat",
            ExerciseType::Lunge => "Lunge",
            ExerciseType::PushUp => "Push-up",
            ExerciseType::PullUp => "Pull-up",
            ExerciseType::CalfRaise => "Calf Raise",
            ExerciseType::JumpSquat => "Jump Squat",
            ExerciseType::Deadlift => "Deadlift",
            ExerciseType::WallSit => "Wall Sit",
            ExerciseType::Bridge => "Glute Bridge",
            ExerciseType::Plank => "Plank",
            ExerciseType::SidePlank => "Side Plank",
            ExerciseType::SitUp => "Sit-up",
            ExerciseType::Crunch => "Crunch",
            ExerciseType::Burpee => "Burpee",
            ExerciseType::MountainClimber => "Mountain Climber",
            ExerciseType::JumpingJack => "Jumping Jack",
            ExerciseType::HighKnees => "High Knees",
        }
    }

    pub fn category(&self) -> ExerciseCategory {
        match self {
            ExerciseType::Squat
            | ExerciseType::Lunge
            | ExerciseType::CalfRaise
            | ExerciseType::Deadlift
            | ExerciseType::WallSit
            | ExerciseType::Bridge => ExerciseCategory::LowerBody,
            ExerciseType::PushUp | ExerciseType::PullUp => ExerciseCategory::UpperBody,
            ExerciseType::Plank
            | ExerciseType::SidePlank
            | ExerciseType::SitUp
            | ExerciseType::Crunch => ExerciseCategory::Core,
            ExerciseType::JumpSquat
            | ExerciseType::MountainClimber
            | ExerciseType::JumpingJack
            | ExerciseType::HighKnees => ExerciseCategory::Cardio,
            ExerciseType::Burpee => ExerciseCategory::FullBody,
        }
    }

    /// Timed holds report seconds (or time buckets) instead of repetitions
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            ExerciseType::Plank | ExerciseType::SidePlank | ExerciseType::WallSit
        )
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = FormError;

    /// Accepts wire names plus the usual spellings ("push-up", "PushUp", "jumping jacks")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let exercise = match compact.as_str() {
            "squat" | "squats" => ExerciseType::Squat,
            "lunge" | "lunges" => ExerciseType::Lunge,
            "pushup" | "pushups" => ExerciseType::PushUp,
            "pullup" | "pullups" => ExerciseType::PullUp,
            "calfraise" | "calfraises" => ExerciseType::CalfRaise,
            "jumpsquat" | "jumpsquats" => ExerciseType::JumpSquat,
            "deadlift" | "deadlifts" => ExerciseType::Deadlift,
            "wallsit" => ExerciseType::WallSit,
            "bridge" | "glutebridge" | "bridges" => ExerciseType::Bridge,
            "plank" => ExerciseType::Plank,
            "sideplank" => ExerciseType::SidePlank,
            "situp" | "situps" => ExerciseType::SitUp,
            "crunch" | "crunches" => ExerciseType::Crunch,
            "burpee" | "burpees" => ExerciseType::Burpee,
            "mountainclimber" | "mountainclimbers" => ExerciseType::MountainClimber,
            "jumpingjack" | "jumpingjacks" => ExerciseType::JumpingJack,
            "highknees" | "highknee" => ExerciseType::HighKnees,
            _ => return Err(FormError::unknown_exercise(s)),
        };
        Ok(exercise)
    }
}
