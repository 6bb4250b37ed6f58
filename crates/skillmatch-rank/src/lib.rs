//! skillmatch-rank
//!
//! Turns base TF-IDF similarity into a recommendation list: additive boosts
//! and penalties from reviewable tables, stable ranking with filters and a
//! non-empty fallback, plus the response envelopes and offline evaluation
//! built on top of it.
pub mod boost;
pub mod engine;
pub mod evaluate;
pub mod ranker;
pub mod response;
pub mod tables;

pub use boost::{BoostBreakdown, Booster};
pub use engine::RecommendationEngine;
pub use ranker::rank;
pub use tables::BoostTables;
