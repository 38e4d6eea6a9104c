//! Generalized rep state machine - declarative transition tables with
//! confidence/dwell gating and per-rep quality scoring
//!
//! Re-exports only. All logic in submodules.

mod machine;
mod rep;

pub use machine::{
    HistoryEntry, MachineEvent, MachineSample, MachineState, RepStateMachine, Transition,
    TransitionHook, ERROR_CONFIDENCE, HISTORY_LEN,
};
pub use rep::{Rep, RepQuality};
