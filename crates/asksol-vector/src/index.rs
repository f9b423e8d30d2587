use std::collections::BTreeMap;

use tracing::debug;

use crate::analyzer::{NgramAnalyzer, NgramRange};
use crate::vocab::Vocabulary;

pub const DEFAULT_MAX_FEATURES: usize = 20_000;

/// Sparse vector as `(feature id, weight)` pairs sorted by feature id.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    pub max_features: usize,
    pub ngrams: NgramRange,
}

impl Default for IndexOptions {
    fn default() -> Self { Self { max_features: DEFAULT_MAX_FEATURES, ngrams: NgramRange::default() } }
}

/// TF-IDF weighted n-gram space fitted once over a corpus.
///
/// Document vectors are L2-normalized and stored as per-feature postings, so
/// scoring a query only touches the features it shares with the corpus.
/// Terms unseen at fit time carry no weight.
#[derive(Debug, Clone)]
pub struct TfidfIndex {
    analyzer: NgramAnalyzer,
    vocab: Vocabulary,
    idf: Vec<f64>,
    postings: Vec<Vec<(usize, f64)>>,
    n_docs: usize,
}

impl TfidfIndex {
    pub fn fit(docs: &[String], max_features: usize) -> Self {
        Self::fit_with(docs, IndexOptions { max_features, ..IndexOptions::default() })
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn fit_with(docs: &[String], options: IndexOptions) -> Self {
        let analyzer = NgramAnalyzer::new(options.ngrams);
        let analyzed: Vec<Vec<String>> = docs.iter().map(|d| analyzer.analyze(d)).collect();
        let vocab = Vocabulary::build(&analyzed, options.max_features);

        let counts: Vec<BTreeMap<usize, f64>> = analyzed.iter().map(|grams| term_counts(&vocab, grams)).collect();

        let mut df = vec![0usize; vocab.len()];
        for doc in &counts {
            for &feature in doc.keys() { df[feature] += 1; }
        }
        let n = docs.len() as f64;
        let idf: Vec<f64> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0).collect();

        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); vocab.len()];
        for (doc_id, doc) in counts.into_iter().enumerate() {
            for (feature, weight) in weigh(doc, &idf) { postings[feature].push((doc_id, weight)); }
        }

        debug!(docs = docs.len(), features = vocab.len(), "fitted tf-idf index");
        Self { analyzer, vocab, idf, postings, n_docs: docs.len() }
    }

    /// L2-normalized TF-IDF vector of `text` in this index's space.
    pub fn transform(&self, text: &str) -> SparseVector {
        let grams = self.analyzer.analyze(text);
        weigh(term_counts(&self.vocab, &grams), &self.idf)
    }

    /// Cosine similarity of `query` against every fitted document, in corpus
    /// order, each within `[0, 1]`.
    pub fn score(&self, query: &str) -> Vec<f64> {
        let mut scores = vec![0.0; self.n_docs];
        for (feature, q_weight) in self.transform(query) {
            for &(doc_id, d_weight) in &self.postings[feature] { scores[doc_id] += q_weight * d_weight; }
        }
        for s in &mut scores { *s = s.clamp(0.0, 1.0); }
        scores
    }

    pub fn idf(&self, term: &str) -> Option<f64> { self.vocab.get(term).map(|id| self.idf[id]) }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocab }

    pub fn len(&self) -> usize { self.n_docs }

    pub fn is_empty(&self) -> bool { self.n_docs == 0 }
}

fn term_counts(vocab: &Vocabulary, grams: &[String]) -> BTreeMap<usize, f64> {
    let mut counts = BTreeMap::new();
    for id in grams.iter().filter_map(|g| vocab.get(g)) { *counts.entry(id).or_insert(0.0) += 1.0; }
    counts
}

fn weigh(counts: BTreeMap<usize, f64>, idf: &[f64]) -> SparseVector {
    let mut vector: SparseVector = counts.into_iter().map(|(id, tf)| (id, tf * idf[id])).collect();
    let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut vector { *w /= norm; }
    }
    vector
}
