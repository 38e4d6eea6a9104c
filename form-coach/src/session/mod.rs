//! Session bookkeeping
//!
//! Folds per-frame results into a summary for the client to persist.

mod aggregator;
mod config;
mod met;

pub use aggregator::{FramePerformance, SessionAggregator, SessionSummary};
pub use config::SessionConfig;
pub use met::{estimate_calories, met_value};
