use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::profiles::ProfileCorpus;
use super::similarity::SparseVector;
use super::tokenizer::Tokenizer;
use crate::core::{Category, ConvoReadyError, MatcherConfig, Result};


/// Term weights learned from a [`ProfileCorpus`].
///
/// * `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
/// * `tf(t, d) = 1 + ln(count(t, d))`
///
/// Profile vectors are tf-idf, scaled to unit length. Term ids follow the
/// lexicographic order of the vocabulary, so the index is a pure function of
/// the profiles.
#[derive(Debug, Clone)]
pub struct TermIndex {
    tokenizer: Tokenizer,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    profiles: Vec<(Category, SparseVector)>,
}

impl TermIndex {
    pub fn build(corpus: &ProfileCorpus, config: &MatcherConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::new(config.max_ngram, config.min_token_chars);

        let documents: Vec<(Category, Vec<String>)> = corpus
            .profiles()
            .iter()
            .map(|p| (p.name, tokenizer.terms(&p.corpus_text)))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, terms) in &documents {
            let unique: BTreeSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(ConvoReadyError::config(
                "profile corpus produced an empty vocabulary",
            ));
        }

        let n_docs = documents.len() as f64;
        let vocabulary: BTreeMap<String, usize> = doc_freq
            .keys()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id))
            .collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            tokenizer,
            vocabulary,
            idf,
            profiles: Vec::with_capacity(documents.len()),
        };

        for (category, terms) in &documents {
            let vector = index.weigh(terms);
            if vector.is_empty() {
                return Err(ConvoReadyError::config(format!(
                    "profile '{}' has no terms of at least {} characters",
                    category, config.min_token_chars
                )));
            }
            debug!("Profile {} -> {} weighted terms", category, vector.len());
            index.profiles.push((*category, vector));
        }

        info!(
            "Built term index: {} profiles, {} terms",
            index.profiles.len(),
            index.vocabulary.len()
        );
        Ok(index)
    }

    /// Unit-length tf-idf vector of `text`. Terms outside the vocabulary are dropped.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.weigh(&self.tokenizer.terms(text))
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for term in terms {
            if let Some(&id) = self.vocabulary.get(term.as_str()) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(id, count)| (id, (1.0 + f64::from(count).ln()) * self.idf[id]))
            .collect();
        SparseVector::from_entries(entries).normalized()
    }

    pub fn profiles(&self) -> &[(Category, SparseVector)] {
        &self.profiles
    }

    pub fn profile(&self, category: Category) -> Option<&SparseVector> {
        self.profiles
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, v)| v)
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&id| self.idf[id])
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}
