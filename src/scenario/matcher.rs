use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::index::TermIndex;
use super::profiles::ProfileCorpus;
use super::similarity::unit_cosine;
use crate::core::{Category, ConvoReadyError, MatcherConfig, Result};
use crate::utils::preview;


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMatch {
    pub category: Category,
    /// Cosine similarity in `[0, 1]`.
    pub score: f64,
}


/// Ranked categories for one query, best first.
///
/// Never empty: when nothing clears the threshold it holds the single
/// `general` entry with score 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchResult")]
pub struct MatchResult {
    matches: Vec<ScenarioMatch>,
    fallback: bool,
}

#[derive(Deserialize)]
struct RawMatchResult {
    matches: Vec<ScenarioMatch>,
    fallback: bool,
}

impl TryFrom<RawMatchResult> for MatchResult {
    type Error = String;

    fn try_from(raw: RawMatchResult) -> std::result::Result<Self, Self::Error> {
        if raw.matches.is_empty() {
            return Err("match result must hold at least one category".to_string());
        }
        Ok(Self {
            matches: raw.matches,
            fallback: raw.fallback,
        })
    }
}

impl MatchResult {
    fn general() -> Self {
        Self {
            matches: vec![ScenarioMatch {
                category: Category::General,
                score: 0.0,
            }],
            fallback: true,
        }
    }

    pub fn matches(&self) -> &[ScenarioMatch] {
        &self.matches
    }

    pub fn categories(&self) -> Vec<Category> {
        self.matches.iter().map(|m| m.category).collect()
    }

    pub fn primary(&self) -> Category {
        self.matches
            .first()
            .map_or(Category::General, |m| m.category)
    }

    /// Runner-up, used to blend content from a second scenario.
    pub fn secondary(&self) -> Option<Category> {
        self.matches.get(1).map(|m| m.category)
    }

    pub fn score_of(&self, category: Category) -> Option<f64> {
        self.matches
            .iter()
            .find(|m| m.category == category)
            .map(|m| m.score)
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}


/// Ranks free text against the category profiles.
///
/// Holds only immutable state after construction, so one instance can be
/// shared across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ScenarioMatcher {
    index: TermIndex,
    config: MatcherConfig,
}

impl ScenarioMatcher {
    pub fn new(corpus: &ProfileCorpus, config: MatcherConfig) -> Result<Self> {
        let index = TermIndex::build(corpus, &config)?;
        Ok(Self { index, config })
    }

    /// Matcher over the shipped profiles.
    pub fn builtin(config: MatcherConfig) -> Result<Self> {
        Self::new(&ProfileCorpus::builtin(), config)
    }

    /// Raw similarity of `text` to every profile, in profile declaration order.
    ///
    /// Fails with [`ConvoReadyError::EmptyQuery`] for blank text.
    pub fn similarities(&self, text: &str) -> Result<Vec<ScenarioMatch>> {
        if text.trim().is_empty() {
            return Err(ConvoReadyError::EmptyQuery);
        }

        let query = self.index.vectorize(text);
        Ok(self
            .index
            .profiles()
            .iter()
            .map(|(category, profile)| ScenarioMatch {
                category: *category,
                score: unit_cosine(&query, profile),
            })
            .collect())
    }

    /// Categories scoring above `min_similarity`, best first; `[general]` if none do.
    pub fn classify(&self, text: &str) -> Result<MatchResult> {
        self.classify_with_threshold(text, self.config.min_similarity)
    }

    pub fn classify_with_threshold(&self, text: &str, min_similarity: f64) -> Result<MatchResult> {
        let mut matches: Vec<ScenarioMatch> = self
            .similarities(text)?
            .into_iter()
            .filter(|m| m.score > min_similarity)
            .collect();

        // stable sort keeps declaration order for equal scores
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));

        if matches.is_empty() {
            debug!(
                "No scenario above {} for '{}', falling back to general",
                min_similarity,
                preview(text, 50)
            );
            return Ok(MatchResult::general());
        }

        debug!(
            "Matched '{}' -> {} ({:.3}), {} candidates",
            preview(text, 50),
            matches[0].category,
            matches[0].score,
            matches.len()
        );
        Ok(MatchResult {
            matches,
            fallback: false,
        })
    }

    pub fn detect(&self, text: &str) -> Result<Vec<Category>> {
        Ok(self.classify(text)?.categories())
    }

    /// Display percentage per requested category: `min(100, trunc(score * confidence_scale))`.
    ///
    /// A presentation heuristic for badges like "56% match", not a calibrated
    /// probability. Categories without a profile report 0.
    pub fn confidence(&self, text: &str, categories: &[Category]) -> Result<BTreeMap<Category, u8>> {
        let scores = self.similarities(text)?;
        Ok(categories
            .iter()
            .map(|&category| {
                let score = scores
                    .iter()
                    .find(|m| m.category == category)
                    .map_or(0.0, |m| m.score);
                (category, self.to_percent(score))
            })
            .collect())
    }

    pub fn to_percent(&self, score: f64) -> u8 {
        (score * self.config.confidence_scale).clamp(0.0, 100.0) as u8
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn index(&self) -> &TermIndex {
        &self.index
    }
}
