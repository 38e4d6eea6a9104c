//! Per-session accumulation of analysis results

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::SessionConfig;
use super::met::estimate_calories;
use crate::analyzer::{AnalysisResult, ExerciseType};

/// One analyzed frame, as kept in the performance history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePerformance {
    pub timestamp: f64,
    pub count: u32,
    pub is_correct_form: bool,
    pub confidence: f32,
}

/// Handed to the client when the session ends
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub exercise_type: ExerciseType,
    pub start_time: f64,
    pub end_time: f64,
    pub total_reps: u32,
    /// Share of analyzable frames with correct form, in [0, 1]
    pub average_form_score: f64,
    /// Distinct corrective messages, in the order first seen
    pub form_corrections: Vec<String>,
    pub duration_seconds: f64,
    pub estimated_calories: f64,
}

pub struct SessionAggregator {
    exercise: ExerciseType,
    config: SessionConfig,
    start_ms: f64,
    history: VecDeque<FramePerformance>,
    corrections: Vec<String>,
    analyzable_frames: u64,
    correct_frames: u64,
    /// Reps banked from sets ended by an exercise reset
    reps_before_reset: u32,
    /// Highest analyzer count seen since the last reset
    set_reps: u32,
}

impl SessionAggregator {
    pub fn start(exercise: ExerciseType, now_ms: f64, config: SessionConfig) -> Self {
        debug!(exercise = exercise.as_str(), "session started");
        Self {
            exercise,
            history: VecDeque::with_capacity(config.history_capacity),
            config,
            start_ms: now_ms,
            corrections: Vec::new(),
            analyzable_frames: 0,
            correct_frames: 0,
            reps_before_reset: 0,
            set_reps: 0,
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.exercise
    }

    pub fn record(&mut self, result: &AnalysisResult, now_ms: f64) {
        if self.history.len() == self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(FramePerformance {
            timestamp: now_ms,
            count: result.current_count,
            is_correct_form: result.is_correct_form,
            confidence: result.confidence,
        });
        self.set_reps = self.set_reps.max(result.current_count);

        // visibility rejections measured nothing, so they neither pass nor fail
        if result.is_visibility_error() {
            return;
        }
        self.analyzable_frames += 1;
        if result.is_correct_form {
            self.correct_frames += 1;
        } else if !self.corrections.contains(&result.feedback) {
            self.corrections.push(result.feedback.clone());
        }
    }

    /// Most recent frames, oldest first
    pub fn history(&self) -> impl Iterator<Item = &FramePerformance> {
        self.history.iter()
    }

    /// Reps over the whole session, across exercise resets
    pub fn total_reps(&self) -> u32 {
        self.reps_before_reset + self.set_reps
    }

    pub fn average_form_score(&self) -> f64 {
        if self.analyzable_frames == 0 {
            return 0.0;
        }
        self.correct_frames as f64 / self.analyzable_frames as f64
    }

    /// Bank the current set when the analyzer count restarts from zero
    pub fn start_new_set(&mut self) {
        self.reps_before_reset += self.set_reps;
        self.set_reps = 0;
    }

    pub fn finish(&self, now_ms: f64) -> SessionSummary {
        let duration_ms = (now_ms - self.start_ms).max(0.0);
        let summary = SessionSummary {
            exercise_type: self.exercise,
            start_time: self.start_ms,
            end_time: now_ms,
            total_reps: self.total_reps(),
            average_form_score: self.average_form_score(),
            form_corrections: self.corrections.clone(),
            duration_seconds: duration_ms / 1000.0,
            estimated_calories: estimate_calories(
                self.exercise,
                self.config.body_weight_kg,
                duration_ms,
                self.total_reps(),
            ),
        };
        debug!(reps = summary.total_reps, score = summary.average_form_score, "session finished");
        summary
    }
}
