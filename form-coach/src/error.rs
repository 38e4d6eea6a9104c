//! Error types for the JS boundary.
//!
//! Low landmark visibility is never an error: analyzers answer it with a
//! zero-confidence coaching result. These variants cover contract violations
//! by the caller (malformed frames, unknown exercise names, bad config).

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised when the caller breaks the frame/session contract.
#[derive(Debug, Error)]
pub enum FormError {
    /// Flat landmark buffer has the wrong number of values.
    #[error("invalid landmark data length: expected {expected}, got {actual}")]
    FrameSize {
        /// Expected number of floats.
        expected: usize,
        /// Number of floats received.
        actual: usize,
    },

    /// Exercise name not recognised.
    #[error("unknown exercise: {0}")]
    UnknownExercise(String),

    /// Session configuration could not be parsed.
    #[error("invalid session config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Session configuration parsed but holds unusable values.
    #[error("invalid session config: {0}")]
    ConfigValue(String),

    /// A result could not be encoded for the JS side.
    #[error("failed to encode {what}: {reason}")]
    Encode {
        /// What was being encoded.
        what: &'static str,
        /// Underlying serializer message.
        reason: String,
    },

    /// A frame or session call arrived before `start_session`.
    #[error("no active session")]
    NoActiveSession,
}

impl FormError {
    /// Creates a frame size mismatch error.
    #[must_use]
    pub const fn frame_size(expected: usize, actual: usize) -> Self {
        Self::FrameSize { expected, actual }
    }

    /// Creates an unknown exercise error.
    #[must_use]
    pub fn unknown_exercise(name: impl Into<String>) -> Self {
        Self::UnknownExercise(name.into())
    }
}

impl FormError {
    /// Creates an encoding error for the named payload.
    #[must_use]
    pub fn encode(what: &'static str, err: &serde_json::Error) -> Self {
        Self::Encode {
            what,
            reason: err.to_string(),
        }
    }
}

impl From<FormError> for JsValue {
    fn from(err: FormError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
