

pub mod processor;
pub mod seeds;

pub use processor::{
    CorpusProcessor, CorpusReport, ScenarioFrequencies, WordFrequency,
    DEFAULT_MAX_LINES, DEFAULT_TOP_WORDS,
};
pub use seeds::{seed_words, SPANISH_STOPWORDS};
