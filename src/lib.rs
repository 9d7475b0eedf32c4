//! Scenario matching for conversation practice.
//!
//! Free-text descriptions of real-life situations are ranked against
//! hand-curated category profiles with tf-idf weighting and cosine
//! similarity. Text matching nothing falls back to [`Category::General`].

pub mod core;
pub mod corpus;
pub mod mcp;
pub mod scenario;
pub mod utils;

pub use utils::preview;


pub use crate::core::category::Category;
pub use crate::core::config::MatcherConfig;
pub use crate::core::error::{ConvoReadyError, Result};
pub use scenario::{
    extract_keywords, CategoryProfile, MatchResult, ProfileCorpus, ScenarioMatch, ScenarioMatcher,
    TermIndex,
};


pub const DEFAULT_MIN_SIMILARITY: f64 = 0.02;


pub const DEFAULT_CONFIDENCE_SCALE: f64 = 200.0;
