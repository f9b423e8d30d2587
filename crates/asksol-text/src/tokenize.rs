use std::sync::OnceLock;

use regex::Regex;
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer, TokenStream};

use asksol_core::config::TokenizerKind;

fn baseline_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| Regex::new(r"\b[a-z0-9]+\b").expect("baseline token pattern is valid"))
}

/// Lowercase, then every maximal ASCII letter/digit run bounded by word
/// boundaries. Always available; every other tokenizer degrades to this.
pub fn baseline_tokens(text: &str) -> Vec<String> {
	let lower = text.to_lowercase();
	baseline_pattern().find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Unicode-aware split on non-alphanumeric characters, lowercased.
pub fn unicode_tokens(text: &str) -> Vec<String> {
	let mut analyzer = TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser).build();
	let mut stream = analyzer.token_stream(text);
	let mut tokens = Vec::new();
	while stream.advance() { tokens.push(stream.token().text.clone()); }
	tokens
}

pub fn tokenize(kind: TokenizerKind, text: &str) -> Vec<String> {
	match kind {
		TokenizerKind::Baseline => baseline_tokens(text),
		TokenizerKind::Unicode => unicode_tokens(text),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn baseline_splits_on_punctuation_and_lowercases() {
		assert_eq!(baseline_tokens("What's the MBA fee, 2024?"), vec!["what", "s", "the", "mba", "fee", "2024"]);
		assert!(baseline_tokens("").is_empty());
		assert!(baseline_tokens("?!  --").is_empty());
	}

	#[test]
	fn baseline_ignores_runs_glued_to_non_ascii_letters() {
		// "café" has no word boundary between "caf" and "é"
		assert_eq!(baseline_tokens("café menu"), vec!["menu"]);
	}

	#[test]
	fn unicode_keeps_non_ascii_words() {
		assert_eq!(unicode_tokens("Café MENU"), vec!["café", "menu"]);
		assert_eq!(tokenize(TokenizerKind::Unicode, "B.Tech fees"), vec!["b", "tech", "fees"]);
	}
}
