//! Squat analyzer
//!
//! Primary metric is the knee angle (hip-knee-ankle), averaged over the
//! visible legs. When the ankles are out of frame it falls back to the hip
//! angle (shoulder-hip-knee) of one chain, and when the shoulders are gone
//! too, to how far the hips have dropped toward knee height. Each fallback
//! costs `FALLBACK_PENALTY` confidence.

use crate::analyzer::{
    confidence, leg_chain, torso_thigh_chain, AnalysisResult, CycleEvent, CyclePhase,
    ExerciseAnalyzer, ExerciseType, Threshold, ThresholdCycle, VisibilityGate,
};
use super::{chain_ids, hip_knee_chain, mean_angle, torso_lean};
use crate::geometry::{angle, distance, vertical_delta};
use crate::pose::LandmarkFrame;

const VISIBILITY_FLOOR: f32 = 0.5;
const COOLDOWN_MS: f64 = 1000.0;

/// Knee angle at or below which the athlete is "down"
pub const DOWN_ANGLE: f32 = 120.0;
/// Knee angle at or above which the athlete is "up"
pub const UP_ANGLE: f32 = 160.0;

/// Confidence cost of measuring without the ankles
pub const FALLBACK_PENALTY: f32 = 0.15;

/// Below this the squat is deeper than we coach for
const MIN_SAFE_KNEE_ANGLE: f32 = 60.0;
const MAX_TORSO_LEAN: f32 = 45.0;

/// Which signal produced the phase metric
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquatMetric {
    KneeAngle,
    HipAngle,
    HipHeight,
}

struct Measurement {
    value: f32,
    confidence: f32,
    source: SquatMetric,
}

pub struct SquatAnalyzer {
    gate: VisibilityGate,
    cycle: ThresholdCycle,
    last_metric: Option<SquatMetric>,
}

impl SquatAnalyzer {
    pub fn new() -> Self {
        Self {
            gate: VisibilityGate::new(VISIBILITY_FLOOR),
            cycle: ThresholdCycle::new(
                Threshold::AtMost(DOWN_ANGLE),
                Threshold::AtLeast(UP_ANGLE),
                COOLDOWN_MS,
            ),
            last_metric: None,
        }
    }

    /// Signal used on the most recent measured frame
    pub fn last_metric(&self) -> Option<SquatMetric> {
        self.last_metric
    }

    fn measure(&self, frame: &LandmarkFrame) -> Option<Measurement> {
        let legs = self.gate.visible_sides(frame, leg_chain);
        if !legs.is_empty() {
            return Some(Measurement {
                value: mean_angle(frame, &legs, leg_chain),
                confidence: confidence(frame, &chain_ids(&legs, leg_chain)),
                source: SquatMetric::KneeAngle,
            });
        }

        if let Some(side) = self.gate.best_side(frame, torso_thigh_chain) {
            let value = angle(
                frame.point(side.shoulder()),
                frame.point(side.hip()),
                frame.point(side.knee()),
            );
            return Some(Measurement {
                value,
                confidence: confidence(frame, &torso_thigh_chain(side)) - FALLBACK_PENALTY,
                source: SquatMetric::HipAngle,
            });
        }

        let side = self.gate.best_side(frame, hip_knee_chain)?;
        let hip = frame.point(side.hip());
        let knee = frame.point(side.knee());
        // 1.0 with the thigh vertical, 0.0 with the hip at knee height;
        // mapped onto the knee-angle scale so the same thresholds apply
        let drop_ratio = (vertical_delta(hip, knee) / distance(hip, knee)).clamp(0.0, 1.0);
        Some(Measurement {
            value: 90.0 + 90.0 * drop_ratio,
            confidence: confidence(frame, &hip_knee_chain(side)) - FALLBACK_PENALTY,
            source: SquatMetric::HipHeight,
        })
    }
}

impl Default for SquatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseAnalyzer for SquatAnalyzer {
    fn exercise_type(&self) -> ExerciseType {
        ExerciseType::Squat
    }

    fn analyze(&mut self, frame: &LandmarkFrame, now_ms: f64) -> AnalysisResult {
        let Some(m) = self.measure(frame) else {
            return AnalysisResult::insufficient_visibility(
                ExerciseType::Squat,
                self.count(),
                "Step back so your hips, knees and ankles are in view",
            );
        };
        if !m.value.is_finite() {
            return AnalysisResult::ambiguous(ExerciseType::Squat, self.count(), m.confidence);
        }
        self.last_metric = Some(m.source);

        let event = self.cycle.update(m.value, now_ms);
        let lean = torso_lean(&self.gate, frame);
        let leaning = lean.is_some_and(|l| l > MAX_TORSO_LEAN);
        let too_deep = m.source == SquatMetric::KneeAngle && m.value < MIN_SAFE_KNEE_ANGLE;

        let feedback = if leaning {
            "Keep your chest up and your back straight"
        } else if too_deep {
            "Too deep - control the descent"
        } else if event == (CycleEvent::Completed { counted: true }) {
            "Great rep! Stand tall, then go again"
        } else {
            match self.cycle.phase() {
                CyclePhase::Contracted if m.value <= DOWN_ANGLE => "Good depth! Drive up through your heels",
                CyclePhase::Contracted => "Keep driving up to full extension",
                CyclePhase::Relaxed if m.value >= UP_ANGLE => "Stand tall, then bend your knees to lower down",
                CyclePhase::Relaxed => "Lower until your thighs are parallel to the floor",
            }
        };

        AnalysisResult::new(
            ExerciseType::Squat,
            self.count(),
            !leaning && !too_deep,
            feedback,
            m.confidence,
        )
    }

    fn count(&self) -> u32 {
        self.cycle.count()
    }

    fn phase(&self) -> &'static str {
        match self.cycle.phase() {
            CyclePhase::Relaxed => "up",
            CyclePhase::Contracted => "down",
        }
    }

    fn reset(&mut self) {
        self.cycle.reset();
        self.last_metric = None;
    }
}
