//! Query resolution: splitting, command recognition, preferences, and
//! the segment evaluation pipeline.
//!
//! - [`split`]: raw input into ordered segments, plus the active-segment
//!   cursor state machine
//! - [`command`]: reserved literals and search-engine directives
//! - [`prefs`]: the immutable preference struct the engine consumes
//! - [`engine`]: the full per-segment pipeline

mod command;
mod engine;
mod prefs;
mod split;

pub use command::{recognize, Command, SearchEngines, WEIGHT_CALC_COMMAND, WEIGHT_CALC_TARGET};
pub use engine::Engine;
pub use prefs::SearchPreferences;
pub use split::{split_query, SegmentCursor};
