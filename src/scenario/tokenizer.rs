use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Unicode word runs; accented Spanish letters count as word characters.
    static ref WORD_RUN: Regex = Regex::new(r"\w+").expect("static regex");
}


/// Splits text into index terms: unigrams plus n-grams up to `max_ngram`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    max_ngram: usize,
    min_token_chars: usize,
}

impl Tokenizer {
    pub fn new(max_ngram: usize, min_token_chars: usize) -> Self {
        Self {
            max_ngram: max_ngram.max(1),
            min_token_chars,
        }
    }

    /// Lowercased word runs with at least `min_token_chars` characters.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        WORD_RUN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| w.chars().count() >= self.min_token_chars)
            .map(str::to_string)
            .collect()
    }

    /// All n-grams of length `1..=max_ngram`, space-joined, in text order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        let mut terms = Vec::with_capacity(tokens.len() * self.max_ngram);
        terms.extend(tokens.iter().cloned());

        for n in 2..=self.max_ngram {
            if tokens.len() < n {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_short_tokens() {
        let tok = Tokenizer::default();
        assert_eq!(
            tok.tokens("I have A Reservation!"),
            vec!["have".to_string(), "reservation".to_string()]
        );
    }

    #[test]
    fn test_accented_letters_are_word_chars() {
        let tok = Tokenizer::default();
        assert_eq!(
            tok.tokens("¿Calefacción rota? Llamé al fontanero."),
            vec!["calefacción", "rota", "llamé", "al", "fontanero"]
        );
    }

    #[test]
    fn test_bigrams_follow_filtered_tokens() {
        let tok = Tokenizer::default();
        let terms = tok.terms("the tap is broken");
        assert_eq!(
            terms,
            vec!["the", "tap", "is", "broken", "the tap", "tap is", "is broken"]
        );

        // single-char tokens are gone before bigrams are formed
        let terms = tok.terms("i have a reservation");
        assert!(terms.contains(&"have reservation".to_string()));
    }

    #[test]
    fn test_unigram_only_and_trigrams() {
        assert_eq!(Tokenizer::new(1, 2).terms("hot water now").len(), 3);

        let terms = Tokenizer::new(3, 2).terms("hot water now");
        assert!(terms.contains(&"hot water now".to_string()));
        assert_eq!(terms.len(), 6);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let tok = Tokenizer::default();
        assert!(tok.terms("").is_empty());
        assert!(tok.terms("  ?! ... ").is_empty());
        assert_eq!(tok.terms("hello"), vec!["hello"]);
    }
}
