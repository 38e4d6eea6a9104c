//! Active session storage and JS bridge
//!
//! Receives MediaPipe landmarks from JavaScript, runs them through the
//! selected exercise analyzer and hands the verdict back as JSON.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::analyzer::{AnalysisResult, ExerciseAnalyzer, ExerciseType};
use crate::error::FormError;
use crate::exercises::create_analyzer;
use crate::pose::LandmarkFrame;
use crate::session::{SessionAggregator, SessionConfig, SessionSummary};

/// One exercise analyzer plus the bookkeeping for its session
pub struct ActiveSession {
    analyzer: Box<dyn ExerciseAnalyzer>,
    aggregator: SessionAggregator,
}

impl ActiveSession {
    pub fn start(exercise: &str, config_json: &str, now_ms: f64) -> Result<Self, FormError> {
        let exercise: ExerciseType = exercise.parse()?;
        let config = SessionConfig::from_json(config_json)?;
        Ok(Self {
            analyzer: create_analyzer(exercise),
            aggregator: SessionAggregator::start(exercise, now_ms, config),
        })
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.analyzer.exercise_type()
    }

    /// Parse one flat landmark buffer, analyze it and record the result
    pub fn analyze(&mut self, data: &[f32], now_ms: f64) -> Result<AnalysisResult, FormError> {
        let frame = LandmarkFrame::from_flat(data)?;
        let result = self.analyzer.analyze(&frame, now_ms);
        self.aggregator.record(&result, now_ms);
        Ok(result)
    }

    pub fn count(&self) -> u32 {
        self.analyzer.count()
    }

    pub fn phase(&self) -> &'static str {
        self.analyzer.phase()
    }

    /// Start the exercise over without ending the session; reps done so
    /// far stay in the session total
    pub fn reset(&mut self) {
        self.analyzer.reset();
        self.aggregator.start_new_set();
    }

    pub fn finish(&self, now_ms: f64) -> SessionSummary {
        self.aggregator.finish(now_ms)
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static SESSION: RefCell<Option<ActiveSession>> = const { RefCell::new(None) };
}

/// One-line console summary of a finished session
fn summary_line(summary: &SessionSummary) -> String {
    let name = summary.exercise_type.display_name();
    if summary.exercise_type.is_timed() {
        format!(
            "Session ended: {name} hold, count {} after {:.0}s",
            summary.total_reps, summary.duration_seconds
        )
    } else {
        format!(
            "Session ended: {name}, {} reps in {:.0}s",
            summary.total_reps, summary.duration_seconds
        )
    }
}

fn with_session<T>(f: impl FnOnce(&mut ActiveSession) -> Result<T, FormError>) -> Result<T, FormError> {
    SESSION.with(|cell| match cell.borrow_mut().as_mut() {
        Some(session) => f(session),
        None => Err(FormError::NoActiveSession),
    })
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Select the exercise and start a session. `config_json` may be empty.
#[wasm_bindgen]
pub fn start_session(exercise: &str, config_json: &str) -> Result<(), JsValue> {
    let session = ActiveSession::start(exercise, config_json, js_sys::Date::now())?;
    crate::console_log!("Session started: {}", session.exercise_type().display_name());
    SESSION.with(|cell| *cell.borrow_mut() = Some(session));
    Ok(())
}

/// Called from JavaScript with a flat Float32Array of 132 values
/// (33 landmarks × x, y, z, visibility). Returns the result as JSON.
#[wasm_bindgen]
pub fn update_landmarks(data: &[f32]) -> Result<String, JsValue> {
    let now_ms = js_sys::Date::now();
    let encoded = with_session(|session| {
        let result = session.analyze(data, now_ms)?;
        serde_json::to_string(&result).map_err(|e| FormError::encode("analysis result", &e))
    });
    encoded.map_err(|err| {
        web_sys::console::warn_1(&err.to_string().into());
        err.into()
    })
}

/// End the session and return its summary as JSON
#[wasm_bindgen]
pub fn end_session() -> Result<String, JsValue> {
    let session = SESSION
        .with(|cell| cell.borrow_mut().take())
        .ok_or(FormError::NoActiveSession)?;
    let summary = session.finish(js_sys::Date::now());
    crate::console_log!("{}", summary_line(&summary));
    serde_json::to_string(&summary)
        .map_err(|e| FormError::encode("session summary", &e).into())
}

/// Zero the count and phase of the current exercise
#[wasm_bindgen]
pub fn reset_exercise() -> Result<(), JsValue> {
    with_session(|session| {
        session.reset();
        Ok(())
    })?;
    Ok(())
}

/// Completed reps so far, 0 without a session
#[wasm_bindgen]
pub fn get_rep_count() -> u32 {
    with_session(|session| Ok(session.count())).unwrap_or(0)
}

/// Current phase label, empty without a session
#[wasm_bindgen]
pub fn get_phase() -> String {
    with_session(|session| Ok(session.phase().to_string())).unwrap_or_default()
}
