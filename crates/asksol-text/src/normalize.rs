use std::sync::Arc;

use tracing::trace;

use asksol_core::config::TokenizerKind;
use asksol_core::traits::{Lemmatizer, PassthroughLemmatizer};

use crate::stopwords::StopWords;
use crate::tokenize::tokenize;

/// Turns raw text into the space-joined token string that both the corpus
/// and queries are indexed with.
///
/// Cheap to clone: the stop-word set and the lemmatizer are shared.
#[derive(Clone)]
pub struct Normalizer {
	tokenizer: TokenizerKind,
	stop_words: Arc<StopWords>,
	lemmatizer: Arc<dyn Lemmatizer>,
}

impl Default for Normalizer {
	fn default() -> Self {
		Self {
			tokenizer: TokenizerKind::Baseline,
			stop_words: Arc::new(StopWords::none()),
			lemmatizer: Arc::new(PassthroughLemmatizer),
		}
	}
}

impl Normalizer {
	pub fn new() -> Self { Self::default() }

	#[must_use]
	pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self { self.tokenizer = tokenizer; self }

	#[must_use]
	pub fn with_stop_words(mut self, stop_words: Arc<StopWords>) -> Self { self.stop_words = stop_words; self }

	#[must_use]
	pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self { self.lemmatizer = lemmatizer; self }

	pub fn normalize(&self, text: &str) -> String {
		let mut out: Vec<String> = Vec::new();
		for token in tokenize(self.tokenizer, text) {
			if token.chars().count() <= 1 || self.stop_words.contains(&token) { continue; }
			match self.lemmatizer.lemmatize(&token) {
				Ok(lemma) => out.push(lemma),
				Err(e) => {
					trace!(token = %token, error = %e, "lemmatizer failed, keeping token");
					out.push(token);
				}
			}
		}
		out.join(" ")
	}

	/// Absent text normalizes to the empty string.
	pub fn normalize_opt(&self, text: Option<&str>) -> String {
		text.map(|t| self.normalize(t)).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use asksol_core::error::{Error, Result};

	struct FailsOnFee;
	impl Lemmatizer for FailsOnFee {
		fn lemmatize(&self, token: &str) -> Result<String> {
			if token == "fee" { Err(Error::Lemma(token.into())) } else { Ok(token.to_uppercase()) }
		}
	}

	#[test]
	fn drops_short_tokens_and_stop_words() {
		let n = Normalizer::new().with_stop_words(Arc::new(StopWords::english()));
		assert_eq!(n.normalize("What is the fee for a MBA?"), "fee mba");
		assert_eq!(n.normalize("the a of"), "");
	}

	#[test]
	fn without_stop_words_only_single_chars_go() {
		assert_eq!(Normalizer::new().normalize("I want a B.Tech seat"), "want tech seat");
	}

	#[test]
	fn lemmatizer_failure_keeps_token() {
		let n = Normalizer::new().with_lemmatizer(Arc::new(FailsOnFee));
		assert_eq!(n.normalize("hostel fee"), "HOSTEL fee");
	}

	#[test]
	fn absent_and_empty_text_normalize_to_empty() {
		let n = Normalizer::new();
		assert_eq!(n.normalize_opt(None), "");
		assert_eq!(n.normalize(""), "");
	}
}
