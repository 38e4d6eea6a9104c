//! Declarative rep state machine
//!
//! READY → CONTRACT → RELAX → READY, with an optional TRANSITION state for
//! the dead zone. Transitions come from a table; the first matching edge
//! out of the current state fires. Low-confidence samples park the machine
//! in ERROR until confidence recovers, then evaluation resumes from the
//! state it left.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rep::{Rep, RepQuality};
use crate::analyzer::RepCounter;

/// Sample confidence below which every state short-circuits to ERROR
pub const ERROR_CONFIDENCE: f32 = 0.3;

/// Diagnostic history length
pub const HISTORY_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineState {
    Ready,
    Contract,
    Relax,
    Transition,
    Error,
}

impl MachineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineState::Ready => "ready",
            MachineState::Contract => "contract",
            MachineState::Relax => "relax",
            MachineState::Transition => "transition",
            MachineState::Error => "error",
        }
    }
}

/// Input the machine needs from every sample
pub trait MachineSample {
    fn confidence(&self) -> f32;
    fn form_errors(&self) -> &[&'static str];
}

/// Side effect attached to an edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionHook {
    OpenRep,
    CloseRep,
}

type Condition<S> = Box<dyn Fn(&S) -> bool>;

/// One edge of the transition table
pub struct Transition<S> {
    pub from: MachineState,
    pub to: MachineState,
    condition: Condition<S>,
    pub min_confidence: Option<f32>,
    /// Minimum dwell time in `from` before the edge may fire
    pub min_duration_ms: Option<f64>,
    pub on_transition: Option<TransitionHook>,
}

impl<S> Transition<S> {
    pub fn new(from: MachineState, to: MachineState, condition: impl Fn(&S) -> bool + 'static) -> Self {
        Self {
            from,
            to,
            condition: Box::new(condition),
            min_confidence: None,
            min_duration_ms: None,
            on_transition: None,
        }
    }

    #[must_use]
    pub fn min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = Some(confidence);
        self
    }

    #[must_use]
    pub fn min_duration_ms(mut self, duration_ms: f64) -> Self {
        self.min_duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn on_transition(mut self, hook: TransitionHook) -> Self {
        self.on_transition = Some(hook);
        self
    }
}

/// Diagnostic snapshot; never used for decisions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoryEntry {
    pub state: MachineState,
    pub timestamp_ms: f64,
    pub confidence: f32,
}

/// What one update did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MachineEvent {
    Hold,
    Entered(MachineState),
    RepCompleted(RepQuality),
    /// Rep closed inside the cooldown window and was dropped
    RepDiscarded,
    LowConfidence,
}

pub struct RepStateMachine<S> {
    transitions: Vec<Transition<S>>,
    state: MachineState,
    /// State to resume once confidence recovers
    resume_state: MachineState,
    entered_at_ms: Option<f64>,
    current_rep: Option<Rep>,
    reps: Vec<Rep>,
    counter: RepCounter,
    history: VecDeque<HistoryEntry>,
}

impl<S: MachineSample> RepStateMachine<S> {
    pub fn new(transitions: Vec<Transition<S>>, cooldown_ms: f64) -> Self {
        Self {
            transitions,
            state: MachineState::Ready,
            resume_state: MachineState::Ready,
            entered_at_ms: None,
            current_rep: None,
            reps: Vec::new(),
            counter: RepCounter::new(cooldown_ms),
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn update(&mut self, sample: &S, now_ms: f64) -> MachineEvent {
        let event = self.step(sample, now_ms);
        self.history.push_back(HistoryEntry {
            state: self.state,
            timestamp_ms: now_ms,
            confidence: sample.confidence(),
        });
        if self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
        event
    }

    fn step(&mut self, sample: &S, now_ms: f64) -> MachineEvent {
        if self.entered_at_ms.is_none() {
            self.entered_at_ms = Some(now_ms);
        }

        let confidence = sample.confidence();
        if confidence.is_nan() || confidence < ERROR_CONFIDENCE {
            if self.state != MachineState::Error {
                self.resume_state = self.state;
                self.state = MachineState::Error;
            }
            return MachineEvent::LowConfidence;
        }
        if self.state == MachineState::Error {
            self.state = self.resume_state;
        }

        if self.state == MachineState::Contract {
            if let Some(rep) = self.current_rep.as_mut() {
                rep.note_errors(sample.form_errors());
            }
        }

        let dwell_ms = now_ms - self.entered_at_ms.unwrap_or(now_ms);
        let Some(index) = self.transitions.iter().position(|t| {
            t.from == self.state
                && t.min_confidence.map_or(true, |min| confidence >= min)
                && t.min_duration_ms.map_or(true, |min| dwell_ms >= min)
                && (t.condition)(sample)
        }) else {
            return MachineEvent::Hold;
        };

        let to = self.transitions[index].to;
        let hook = self.transitions[index].on_transition;
        debug!(from = self.state.as_str(), to = to.as_str(), "state transition");
        self.state = to;
        self.entered_at_ms = Some(now_ms);

        match hook {
            Some(TransitionHook::OpenRep) => {
                let mut rep = Rep::open(self.counter.count() + 1, now_ms);
                rep.note_errors(sample.form_errors());
                self.current_rep = Some(rep);
                MachineEvent::Entered(to)
            }
            Some(TransitionHook::CloseRep) => self.close_rep(now_ms),
            None => MachineEvent::Entered(to),
        }
    }

    fn close_rep(&mut self, now_ms: f64) -> MachineEvent {
        let Some(mut rep) = self.current_rep.take() else {
            return MachineEvent::Entered(self.state);
        };
        if !self.counter.try_increment(now_ms) {
            return MachineEvent::RepDiscarded;
        }
        rep.close(self.counter.count(), now_ms);
        let quality = rep.quality;
        self.reps.push(rep);
        MachineEvent::RepCompleted(quality)
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    /// Completed reps since the last reset
    pub fn reps(&self) -> &[Rep] {
        &self.reps
    }

    pub fn last_rep(&self) -> Option<&Rep> {
        self.reps.last()
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn reset(&mut self) {
        self.state = MachineState::Ready;
        self.resume_state = MachineState::Ready;
        self.entered_at_ms = None;
        self.current_rep = None;
        self.reps.clear();
        self.counter.reset();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        value: f32,
        confidence: f32,
        errors: Vec<&'static str>,
    }

    impl MachineSample for Sample {
        fn confidence(&self) -> f32 {
            self.confidence
        }

        fn form_errors(&self) -> &[&'static str] {
            &self.errors
        }
    }

    fn sample(value: f32) -> Sample {
        Sample { value, confidence: 0.9, errors: Vec::new() }
    }

    fn machine(cooldown_ms: f64) -> RepStateMachine<Sample> {
        RepStateMachine::new(
            vec![
                Transition::new(MachineState::Ready, MachineState::Contract, |s: &Sample| s.value < 100.0)
                    .on_transition(TransitionHook::OpenRep),
                Transition::new(MachineState::Contract, MachineState::Relax, |s: &Sample| s.value > 150.0)
                    .min_duration_ms(200.0)
                    .on_transition(TransitionHook::CloseRep),
                Transition::new(MachineState::Relax, MachineState::Ready, |_: &Sample| true),
            ],
            cooldown_ms,
        )
    }

    #[test]
    fn full_cycle_closes_and_scores_rep() {
        let mut m = machine(0.0);
        m.update(&sample(170.0), 0.0);
        assert_eq!(m.update(&sample(90.0), 100.0), MachineEvent::Entered(MachineState::Contract));
        assert_eq!(m.update(&sample(160.0), 1600.0), MachineEvent::RepCompleted(RepQuality::Excellent));
        assert_eq!(m.state(), MachineState::Relax);
        assert_eq!(m.update(&sample(170.0), 1633.0), MachineEvent::Entered(MachineState::Ready));
        assert_eq!(m.count(), 1);
        assert_eq!(m.reps()[0].count, 1);
        assert_eq!(m.reps()[0].end_time, Some(1600.0));
    }

    #[test]
    fn min_duration_blocks_flicker() {
        let mut m = machine(0.0);
        m.update(&sample(90.0), 0.0);
        assert_eq!(m.update(&sample(160.0), 100.0), MachineEvent::Hold);
        assert_eq!(m.state(), MachineState::Contract);
        assert!(matches!(m.update(&sample(160.0), 250.0), MachineEvent::RepCompleted(_)));
    }

    #[test]
    fn low_confidence_parks_in_error_and_resumes() {
        let mut m = machine(0.0);
        m.update(&sample(90.0), 0.0);
        let dark = Sample { value: 160.0, confidence: 0.1, errors: Vec::new() };
        assert_eq!(m.update(&dark, 300.0), MachineEvent::LowConfidence);
        assert_eq!(m.state(), MachineState::Error);
        assert_eq!(m.count(), 0);
        assert!(matches!(m.update(&sample(160.0), 400.0), MachineEvent::RepCompleted(_)));
        assert_eq!(m.count(), 1);
    }

    #[test]
    fn form_errors_accumulate_on_open_rep() {
        let mut m = machine(0.0);
        m.update(&sample(90.0), 0.0);
        let sloppy = Sample { value: 95.0, confidence: 0.9, errors: vec!["a", "b", "c"] };
        m.update(&sloppy, 500.0);
        m.update(&sample(160.0), 2000.0);
        assert_eq!(m.last_rep().map(|r| r.quality), Some(RepQuality::Poor));
    }

    #[test]
    fn cooldown_discards_rep() {
        let mut m = machine(5000.0);
        m.update(&sample(90.0), 0.0);
        m.update(&sample(160.0), 1000.0);
        m.update(&sample(170.0), 1100.0);
        m.update(&sample(90.0), 1200.0);
        assert_eq!(m.update(&sample(160.0), 2000.0), MachineEvent::RepDiscarded);
        assert_eq!(m.count(), 1);
        assert_eq!(m.reps().len(), 1);
    }

    #[test]
    fn history_is_bounded_and_reset_clears() {
        let mut m = machine(0.0);
        for i in 0..25 {
            m.update(&sample(170.0), f64::from(i) * 33.0);
        }
        assert_eq!(m.history().count(), HISTORY_LEN);
        m.reset();
        assert_eq!(m.history().count(), 0);
        assert_eq!(m.state(), MachineState::Ready);
        assert_eq!(m.count(), 0);
    }
}
