//! Synonym expansion for recall.
//!
//! A [`Thesaurus`] is a JSON object mapping a token to its synonym sets:
//!
//! ```json
//! { "fee": [["fee", "tuition_fee"], ["charge", "cost"]] }
//! ```
//!
//! Expansion is off unless a retriever is built with a source that reports
//! itself available.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use asksol_core::error::{Error, Result};
use asksol_core::traits::{NoSynonyms, SynonymSource};

use crate::normalize::Normalizer;
use crate::tokenize::baseline_tokens;

pub const MAX_SYNSETS: usize = 3;
pub const MAX_PHRASES_PER_SYNSET: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thesaurus {
	entries: HashMap<String, Vec<Vec<String>>>,
}

impl Thesaurus {
	pub fn from_path(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
		let entries: HashMap<String, Vec<Vec<String>>> =
			serde_json::from_str(&content).map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
		Ok(Self::from_map(entries))
	}

	/// Keys are lowercased so lookups match baseline tokens.
	pub fn from_map(entries: HashMap<String, Vec<Vec<String>>>) -> Self {
		Self { entries: entries.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect() }
	}

	/// Re-key and rewrite every phrase through `normalizer`, so lookups and
	/// appended phrases live in the same token space as normalized text.
	/// Keys that collapse to one form merge their synsets in key order; keys
	/// and phrases that normalize to nothing are dropped.
	pub fn normalized(&self, normalizer: &Normalizer) -> Self {
		let mut keys: Vec<&String> = self.entries.keys().collect();
		keys.sort();
		let mut entries: HashMap<String, Vec<Vec<String>>> = HashMap::new();
		for key in keys {
			let normalized_key = normalizer.normalize(&key.replace('_', " "));
			if normalized_key.is_empty() { continue; }
			let synsets = self.entries[key].iter().map(|synset| {
				synset
					.iter()
					.map(|phrase| normalizer.normalize(&phrase.replace('_', " ")))
					.filter(|phrase| !phrase.is_empty())
					.collect::<Vec<_>>()
			});
			entries.entry(normalized_key).or_default().extend(synsets.filter(|synset| !synset.is_empty()));
		}
		Self { entries }
	}

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl SynonymSource for Thesaurus {
	fn synsets(&self, token: &str) -> Vec<Vec<String>> {
		self.entries.get(token).cloned().unwrap_or_default()
	}
}

#[derive(Clone)]
pub struct SynonymExpander {
	source: Arc<dyn SynonymSource>,
}

impl Default for SynonymExpander {
	fn default() -> Self { Self::disabled() }
}

impl SynonymExpander {
	pub fn new(source: Arc<dyn SynonymSource>) -> Self { Self { source } }

	pub fn disabled() -> Self { Self { source: Arc::new(NoSynonyms) } }

	pub fn is_enabled(&self) -> bool { self.source.is_available() }

	/// Original tokens in order, then up to 3×3 synonym phrases per distinct
	/// token that are not already in the sequence.
	pub fn expand(&self, text: &str) -> String {
		if !self.source.is_available() { return text.to_string(); }
		let tokens = baseline_tokens(text);
		let mut expanded = tokens.clone();
		let mut visited: HashSet<&str> = HashSet::new();
		for token in &tokens {
			if !visited.insert(token.as_str()) { continue; }
			for synset in self.source.synsets(token).iter().take(MAX_SYNSETS) {
				for phrase in synset.iter().take(MAX_PHRASES_PER_SYNSET) {
					let phrase = phrase.replace('_', " ");
					if !expanded.contains(&phrase) { expanded.push(phrase); }
				}
			}
		}
		expanded.join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn thesaurus() -> Thesaurus {
		let mut map = HashMap::new();
		map.insert(
			"fee".to_string(),
			vec![
				vec!["fee".to_string(), "tuition_fee".to_string()],
				vec!["charge".to_string(), "cost".to_string(), "price".to_string(), "toll".to_string()],
				vec!["fee".to_string()],
				vec!["ignored".to_string()],
			],
		);
		map.insert("Hostel".to_string(), vec![vec!["dormitory".to_string(), "dorm".to_string()]]);
		Thesaurus::from_map(map)
	}

	#[test]
	fn disabled_expander_returns_input_verbatim() {
		let e = SynonymExpander::disabled();
		assert!(!e.is_enabled());
		assert_eq!(e.expand("Hostel FEE!"), "Hostel FEE!");
	}

	#[test]
	fn appends_capped_unique_phrases_after_tokens() {
		let e = SynonymExpander::new(Arc::new(thesaurus()));
		assert_eq!(e.expand("hostel fee fee"), "hostel fee fee dormitory dorm tuition fee charge cost price");
	}

	#[test]
	fn normalized_thesaurus_speaks_the_normalizer_language() {
		let mut map = HashMap::new();
		map.insert("dormitories".to_string(), vec![vec!["hostel".to_string(), "the".to_string()]]);
		map.insert("dormitory".to_string(), vec![vec!["guest_rooms".to_string()]]);
		map.insert("the".to_string(), vec![vec!["ignored".to_string()]]);
		let normalizer = Normalizer::new()
			.with_stop_words(Arc::new(crate::stopwords::StopWords::english()))
			.with_lemmatizer(Arc::new(crate::lemma::SnowballLemmatizer::english()));

		let t = Thesaurus::from_map(map).normalized(&normalizer);
		assert_eq!(t.len(), 1, "plural and singular merge, stop-word key dropped");
		assert_eq!(t.synsets("dormitori"), vec![vec!["hostel".to_string()], vec!["guest room".to_string()]]);

		let e = SynonymExpander::new(Arc::new(t));
		assert_eq!(e.expand(&normalizer.normalize("Dormitory curfew")), "dormitori curfew hostel guest room");
	}

	#[test]
	fn empty_text_stays_empty() {
		assert_eq!(SynonymExpander::new(Arc::new(thesaurus())).expand(""), "");
	}
}
