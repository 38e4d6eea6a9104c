//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod session;

pub use session::{
    // WASM entry points
    end_session,
    get_phase,
    get_rep_count,
    reset_exercise,
    start_session,
    update_landmarks,
    // Internal API
    ActiveSession,
};
