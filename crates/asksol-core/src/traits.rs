//! Optional linguistic capabilities.
//!
//! Each capability has a passthrough implementation so the pipeline never
//! branches on whether one is present.

use crate::error::Result;

pub trait Lemmatizer: Send + Sync {
    /// Map a lowercase token to its base form. Callers treat `Err` as
    /// "keep the token unchanged".
    fn lemmatize(&self, token: &str) -> Result<String>;
}

pub trait SynonymSource: Send + Sync {
    /// Synonym sets for `token`, most relevant first. Phrases may use `_`
    /// between words.
    fn synsets(&self, token: &str) -> Vec<Vec<String>>;

    /// `false` means expansion must return its input untouched.
    fn is_available(&self) -> bool { true }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLemmatizer;

impl Lemmatizer for PassthroughLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String> { Ok(token.to_string()) }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

impl SynonymSource for NoSynonyms {
    fn synsets(&self, _token: &str) -> Vec<Vec<String>> { Vec::new() }
    fn is_available(&self) -> bool { false }
}
