

pub mod index;
pub mod keywords;
pub mod matcher;
pub mod profiles;
pub mod similarity;
pub mod tokenizer;

pub use index::TermIndex;
pub use keywords::{extract_keywords, DEFAULT_MAX_KEYWORDS};
pub use matcher::{MatchResult, ScenarioMatch, ScenarioMatcher};
pub use profiles::{CategoryProfile, ProfileCorpus};
pub use similarity::SparseVector;
pub use tokenizer::Tokenizer;
