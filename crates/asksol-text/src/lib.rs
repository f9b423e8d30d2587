//! asksol-text
//!
//! Text analysis for retrieval: baseline and Unicode tokenization, stop-word
//! filtering, Snowball lemmatization, synonym expansion, and the
//! character-alignment similarity used for dedup and fuzzy matching.

pub mod tokenize;
pub mod stopwords;
pub mod lemma;
pub mod normalize;
pub mod synonyms;
pub mod similarity;

pub use lemma::SnowballLemmatizer;
pub use normalize::Normalizer;
pub use similarity::similarity;
pub use stopwords::StopWords;
pub use synonyms::{SynonymExpander, Thesaurus};
