//! asksol-vector
//!
//! Sparse TF-IDF vector space over word unigrams and bigrams, with cosine
//! scoring of a query against every fitted document.

pub mod analyzer;
pub mod vocab;
pub mod index;

pub use analyzer::{NgramAnalyzer, NgramRange};
pub use index::{IndexOptions, SparseVector, TfidfIndex, DEFAULT_MAX_FEATURES};
pub use vocab::Vocabulary;
