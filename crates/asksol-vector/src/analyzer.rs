use std::sync::OnceLock;

use regex::Regex;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("word pattern is valid"))
}

/// Inclusive range of word n-gram sizes extracted per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

impl Default for NgramRange {
    fn default() -> Self { Self { min: 1, max: 2 } }
}

/// Lowercases, keeps word tokens of two or more word characters, then emits
/// every n-gram of each size in the range: all unigrams, then all bigrams, ...
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NgramAnalyzer {
    range: NgramRange,
}

impl NgramAnalyzer {
    pub fn new(range: NgramRange) -> Self {
        let min = range.min.max(1);
        Self { range: NgramRange { min, max: range.max.max(min) } }
    }

    pub fn range(&self) -> NgramRange { self.range }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = word_pattern().find_iter(&lower).map(|m| m.as_str()).collect();
        let mut grams = Vec::new();
        for n in self.range.min..=self.range.max {
            if n == 1 {
                grams.extend(words.iter().map(|w| (*w).to_string()));
            } else {
                grams.extend(words.windows(n).map(|w| w.join(" ")));
            }
        }
        grams
    }
}
