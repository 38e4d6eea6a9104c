//! Form Coach - real-time exercise form analysis
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => ($crate::log(&format_args!($($t)*).to_string()))
}
pub(crate) use console_log;

pub mod analyzer;
mod bridge;
pub mod error;
pub mod exercises;
pub mod geometry;
pub mod motion;
pub mod pose;
pub mod session;
pub mod state_machine;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    end_session, get_phase, get_rep_count, reset_exercise, start_session, update_landmarks,
    ActiveSession,
};

pub use analyzer::{AnalysisResult, ExerciseAnalyzer, ExerciseCategory, ExerciseType};
pub use error::FormError;
pub use exercises::create_analyzer;
pub use pose::{Landmark, LandmarkFrame, LandmarkId, Side};
pub use session::{SessionAggregator, SessionConfig, SessionSummary};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
