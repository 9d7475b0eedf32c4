use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::seeds::{seed_words, SPANISH_STOPWORDS};
use crate::core::{Category, Result};

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("static regex");
}


pub const DEFAULT_MAX_LINES: usize = 5_000_000;
pub const DEFAULT_TOP_WORDS: usize = 20;
const PROGRESS_EVERY: usize = 500_000;
const PER_TOKENS: f64 = 100_000.0;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    /// Occurrences per 100k scenario tokens, rounded half to even.
    pub per_100k: u64,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFrequencies {
    pub category: Category,
    pub lines: usize,
    pub tokens: u64,
    pub top_words: Vec<WordFrequency>,
}


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    pub total_lines: usize,
    pub matched_lines: usize,
    pub scenarios: Vec<ScenarioFrequencies>,
}

impl CorpusReport {
    pub fn match_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            self.matched_lines as f64 / self.total_lines as f64
        }
    }

    pub fn scenario(&self, category: Category) -> Option<&ScenarioFrequencies> {
        self.scenarios.iter().find(|s| s.category == category)
    }
}


/// Word counts for one scenario, remembering first-seen order for ties.
#[derive(Debug, Default)]
struct WordCounter {
    positions: HashMap<String, usize>,
    counts: Vec<(String, u64)>,
    total: u64,
}

impl WordCounter {
    fn update(&mut self, tokens: &[String]) {
        for token in tokens {
            match self.positions.get(token) {
                Some(&pos) => self.counts[pos].1 += 1,
                None => {
                    self.positions.insert(token.clone(), self.counts.len());
                    self.counts.push((token.clone(), 1));
                }
            }
            self.total += 1;
        }
    }

    fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}


/// Assigns subtitle lines to scenarios by seed-word voting and tallies
/// per-scenario word frequencies.
pub struct CorpusProcessor {
    seeds: Vec<(Category, HashSet<&'static str>)>,
    max_lines: usize,
    top_words: usize,
}

impl CorpusProcessor {
    pub fn new(max_lines: usize, top_words: usize) -> Self {
        let seeds = Category::iter()
            .filter(|c| !c.is_fallback())
            .map(|c| (c, seed_words(c).iter().copied().collect()))
            .collect();
        Self {
            seeds,
            max_lines,
            top_words,
        }
    }

    /// Lowercased alphabetic words longer than two chars, minus Spanish stopwords.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        NON_WORD
            .replace_all(&lowered, " ")
            .split_whitespace()
            .filter(|w| w.chars().count() > 2)
            .filter(|w| !SPANISH_STOPWORDS.contains(w))
            .filter(|w| w.chars().all(char::is_alphabetic))
            .map(str::to_string)
            .collect()
    }

    /// Scenario with the most seed hits. Ties go to the scenario that was hit first.
    pub fn classify_line(&self, tokens: &[String]) -> Option<Category> {
        let mut votes: Vec<(Category, usize)> = Vec::new();
        for token in tokens {
            for (category, seeds) in &self.seeds {
                if seeds.contains(token.as_str()) {
                    match votes.iter_mut().find(|(c, _)| c == category) {
                        Some((_, count)) => *count += 1,
                        None => votes.push((*category, 1)),
                    }
                }
            }
        }

        let mut best: Option<(Category, usize)> = None;
        for (category, count) in votes {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category)
    }

    pub fn process<R: BufRead>(&self, reader: R) -> Result<CorpusReport> {
        let mut counters: Vec<(Category, WordCounter, usize)> = self
            .seeds
            .iter()
            .map(|(c, _)| (*c, WordCounter::default(), 0))
            .collect();
        let mut report = CorpusReport::default();

        for (i, raw) in reader.split(b'\n').enumerate() {
            if i >= self.max_lines {
                break;
            }
            let raw = raw?;
            // invalid utf-8 is dropped, not replaced, so words stay whole
            let line: String = raw.utf8_chunks().map(|chunk| chunk.valid()).collect();

            // bilingual files: the target language is the last column
            let text = if line.contains('\t') {
                line.trim().rsplit('\t').next().unwrap_or_default()
            } else {
                line.trim()
            };
            if text.is_empty() {
                continue;
            }

            let tokens = self.tokenize(text);
            if tokens.is_empty() {
                continue;
            }
            report.total_lines += 1;

            if let Some(category) = self.classify_line(&tokens) {
                report.matched_lines += 1;
                if let Some((_, counter, lines)) = counters.iter_mut().find(|(c, _, _)| *c == category) {
                    *lines += 1;
                    counter.update(&tokens);
                }
            }

            if (i + 1) % PROGRESS_EVERY == 0 {
                info!("Processed {} lines ({} matched)", i + 1, report.matched_lines);
            }
        }

        for (category, counter, lines) in counters {
            if counter.total == 0 {
                continue;
            }
            debug!("{}: {} lines, {} tokens", category, lines, counter.total);
            let top_words = counter
                .most_common(self.top_words)
                .into_iter()
                .map(|(word, count)| WordFrequency {
                    word,
                    per_100k: (count as f64 / counter.total as f64 * PER_TOKENS).round_ties_even() as u64,
                })
                .collect();
            report.scenarios.push(ScenarioFrequencies {
                category,
                lines,
                tokens: counter.total,
                top_words,
            });
        }

        info!(
            "Corpus done: {} lines, {} matched ({:.1}%)",
            report.total_lines,
            report.matched_lines,
            report.match_rate() * 100.0
        );
        Ok(report)
    }

    pub fn process_file(&self, path: &Path) -> Result<CorpusReport> {
        info!("Processing corpus {}", path.display());
        let file = File::open(path)?;
        self.process(BufReader::new(file))
    }
}

impl Default for CorpusProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES, DEFAULT_TOP_WORDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tokenize_filters() {
        let p = CorpusProcessor::default();
        assert_eq!(
            p.tokenize("¡El GRIFO está roto, llama al fontanero! 24h h2o"),
            vec!["grifo", "está", "roto", "llama", "fontanero"]
        );
        assert!(p.tokenize("de la que y 123").is_empty());
    }

    #[test]
    fn test_classify_line_majority() {
        let p = CorpusProcessor::default();
        let line = tokens(&["grifo", "fontanero", "mesa"]);
        assert_eq!(p.classify_line(&line), Some(Category::Housing));
        assert_eq!(p.classify_line(&tokens(&["nada", "raro"])), None);
    }

    #[test]
    fn test_classify_line_tie_goes_to_first_hit() {
        let p = CorpusProcessor::default();
        // ducha votes hotel then housing; mesa votes restaurant
        assert_eq!(p.classify_line(&tokens(&["ducha", "mesa"])), Some(Category::Hotel));
        assert_eq!(p.classify_line(&tokens(&["mesa", "ducha"])), Some(Category::Restaurant));
    }

    #[test]
    fn test_process_counts_and_normalises() {
        let corpus = "\
hola amigo\tel grifo gotea y el fontanero no viene
grifo roto
\n
123 !!!
el camarero trae la carta
";
        let report = CorpusProcessor::default().process(Cursor::new(corpus)).unwrap();
        assert_eq!(report.total_lines, 3);
        assert_eq!(report.matched_lines, 3);

        let housing = report.scenario(Category::Housing).unwrap();
        assert_eq!(housing.lines, 2);
        assert_eq!(housing.tokens, 6);
        assert_eq!(housing.top_words[0].word, "grifo");
        assert_eq!(housing.top_words[0].per_100k, 33_333);
        // ties keep first-seen order
        assert_eq!(housing.top_words[1].word, "gotea");

        let restaurant = report.scenario(Category::Restaurant).unwrap();
        assert_eq!(restaurant.tokens, 3);
        assert!(report.scenario(Category::Work).is_none());
    }

    #[test]
    fn test_max_lines_and_top_words() {
        let corpus = "grifo fontanero tubería\nmesa camarero\n";
        let report = CorpusProcessor::new(1, 2).process(Cursor::new(corpus)).unwrap();
        assert_eq!(report.total_lines, 1);
        let housing = report.scenario(Category::Housing).unwrap();
        assert_eq!(housing.top_words.len(), 2);
        assert_eq!(housing.top_words[0].per_100k, 33_333);
    }

    #[test]
    fn test_invalid_utf8_is_dropped() {
        let corpus: &[u8] = b"el gri\xFFfo del fontanero\n";
        let report = CorpusProcessor::default().process(Cursor::new(corpus)).unwrap();
        let housing = report.scenario(Category::Housing).unwrap();
        assert_eq!(housing.tokens, 2);
        assert!(housing.top_words.iter().any(|w| w.word == "grifo"));
        assert!(housing.top_words.iter().all(|w| w.word != "gri"));
    }

    #[test]
    fn test_empty_input() {
        let report = CorpusProcessor::default().process(Cursor::new("")).unwrap();
        assert_eq!(report, CorpusReport::default());
        assert_eq!(report.match_rate(), 0.0);
    }
}
