use rust_stemmers::{Algorithm, Stemmer};

use asksol_core::error::{Error, Result};
use asksol_core::traits::Lemmatizer;

/// Snowball stemmer used as the lemmatizer capability. Reduces inflected
/// forms ("fees", "courses") to a shared base so queries and questions meet.
/// Same algorithm as tantivy's `Stemmer` filter, called without a token
/// pipeline.
pub struct SnowballLemmatizer {
	stemmer: Stemmer,
}

impl SnowballLemmatizer {
	pub fn english() -> Self { Self { stemmer: Stemmer::create(Algorithm::English) } }
}

impl Default for SnowballLemmatizer {
	fn default() -> Self { Self::english() }
}

impl Lemmatizer for SnowballLemmatizer {
	fn lemmatize(&self, token: &str) -> Result<String> {
		let stem = self.stemmer.stem(token);
		if stem.is_empty() {
			return Err(Error::Lemma(token.to_string()));
		}
		Ok(stem.into_owned())
	}
}
