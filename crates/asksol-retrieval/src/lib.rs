//! asksol-retrieval
//!
//! Question matching over a fixed corpus: normalize → expand → TF-IDF cosine →
//! stable ranking → answer dedup → threshold split, plus a character-similarity
//! fallback that bypasses the vector space.

use std::sync::Arc;

use tracing::debug;

use asksol_core::config::RetrievalSettings;
use asksol_core::traits::SynonymSource;
use asksol_core::types::{CorpusEntry, Retrieval, ScoredResult};
use asksol_text::{similarity, Normalizer, SnowballLemmatizer, StopWords, SynonymExpander, Thesaurus};
use asksol_vector::{IndexOptions, TfidfIndex};

/// Candidates scoring below this are never returned by vector retrieval.
pub const SCORE_FLOOR: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrieveParams {
    pub top_k: usize,
    pub threshold: f64,
    pub dedupe_threshold: f64,
}

impl Default for RetrieveParams {
    fn default() -> Self { Self { top_k: 5, threshold: 0.25, dedupe_threshold: 0.85 } }
}

impl RetrieveParams {
    pub fn from_settings(settings: &RetrievalSettings) -> Self {
        Self { top_k: settings.top_k, threshold: settings.threshold, dedupe_threshold: settings.dedupe_threshold }
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self { self.top_k = top_k; self }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self { self.threshold = threshold; self }
}

/// Builds retrievers that share one text pipeline. The global retriever and
/// every per-request scoped retriever come from the same factory, so corpus
/// and queries are always prepared the same way.
#[derive(Clone, Default)]
pub struct RetrieverFactory {
    normalizer: Normalizer,
    expander: SynonymExpander,
    index_options: IndexOptions,
}

impl RetrieverFactory {
    pub fn new(normalizer: Normalizer, expander: SynonymExpander, index_options: IndexOptions) -> Self {
        Self { normalizer, expander, index_options }
    }

    /// `thesaurus` is only used when `settings.use_synonyms` is set. Its keys
    /// and phrases are normalized with the same pipeline as questions and
    /// queries, so stemmed tokens still find their synonyms.
    pub fn from_settings(settings: &RetrievalSettings, thesaurus: Option<&Thesaurus>) -> Self {
        let mut normalizer = Normalizer::new().with_tokenizer(settings.tokenizer);
        if settings.use_stop_words {
            normalizer = normalizer.with_stop_words(Arc::new(StopWords::english()));
        }
        if settings.use_lemmatizer {
            normalizer = normalizer.with_lemmatizer(Arc::new(SnowballLemmatizer::english()));
        }
        let expander = match thesaurus {
            Some(thesaurus) if settings.use_synonyms => {
                let source: Arc<dyn SynonymSource> = Arc::new(thesaurus.normalized(&normalizer));
                SynonymExpander::new(source)
            }
            _ => SynonymExpander::disabled(),
        };
        let index_options = IndexOptions { max_features: settings.max_features, ..IndexOptions::default() };
        Self::new(normalizer, expander, index_options)
    }

    pub fn build(&self, entries: &[CorpusEntry]) -> Retriever { self.build_owned(entries.to_vec()) }

    pub fn build_owned(&self, entries: Vec<CorpusEntry>) -> Retriever {
        let prepared: Vec<String> = entries
            .iter()
            .map(|e| self.expander.expand(&self.normalizer.normalize(&e.question)))
            .collect();
        let index = TfidfIndex::fit_with(&prepared, self.index_options);
        debug!(
            entries = entries.len(),
            features = index.vocabulary().len(),
            synonyms = self.expander.is_enabled(),
            "retriever built"
        );
        Retriever { entries, normalizer: self.normalizer.clone(), expander: self.expander.clone(), index }
    }
}

/// Read-only after construction; share it by reference across requests.
pub struct Retriever {
    entries: Vec<CorpusEntry>,
    normalizer: Normalizer,
    expander: SynonymExpander,
    index: TfidfIndex,
}

impl Retriever {
    pub fn retrieve(&self, query: &str, params: &RetrieveParams) -> Retrieval {
        if params.top_k == 0 || self.entries.is_empty() {
            return Retrieval::default();
        }
        let prepared = self.expander.expand(&self.normalizer.normalize(query));
        let scores = self.index.score(&prepared);

        let mut dedupe = AnswerDeduper::new(params.dedupe_threshold);
        let mut considered = Vec::new();
        for i in rank_descending(&scores) {
            let score = scores[i];
            if score < SCORE_FLOOR { break; }
            let entry = &self.entries[i];
            let answer = entry.answer.trim();
            if !dedupe.admit(answer) { continue; }
            considered.push(ScoredResult { score, question: entry.question.clone(), answer: answer.to_string() });
            if considered.len() >= params.top_k { break; }
        }
        let accepted: Vec<ScoredResult> = considered.iter().filter(|r| r.score >= params.threshold).cloned().collect();
        debug!(query, prepared = %prepared, considered = considered.len(), accepted = accepted.len(), "vector retrieval");
        Retrieval { accepted, considered }
    }

    /// Character-similarity match of the raw query against raw questions.
    /// No score floor: the best entry is returned however weak it is.
    pub fn fuzzy_fallback(&self, query: &str, top_k: usize, dedupe_threshold: f64) -> Vec<ScoredResult> {
        if top_k == 0 { return Vec::new(); }
        let lowered = query.to_lowercase();
        let scores: Vec<f64> = self.entries.iter().map(|e| similarity(&lowered, &e.question.to_lowercase())).collect();

        let mut dedupe = AnswerDeduper::new(dedupe_threshold);
        let mut best = Vec::new();
        for i in rank_descending(&scores) {
            let entry = &self.entries[i];
            let answer = entry.answer.trim();
            if !dedupe.admit(answer) { continue; }
            best.push(ScoredResult { score: scores[i], question: entry.question.clone(), answer: answer.to_string() });
            if best.len() >= top_k { break; }
        }
        debug!(query, returned = best.len(), "fuzzy fallback");
        best
    }

    pub fn entries(&self) -> &[CorpusEntry] { &self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn vocabulary_len(&self) -> usize { self.index.vocabulary().len() }

    pub fn expands_synonyms(&self) -> bool { self.expander.is_enabled() }
}

/// Indices ordered by descending score; equal scores keep corpus order.
fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

struct AnswerDeduper {
    kept: Vec<String>,
    threshold: f64,
}

impl AnswerDeduper {
    fn new(threshold: f64) -> Self { Self { kept: Vec::new(), threshold } }

    /// `false` when `answer` is a near-duplicate of one already admitted.
    fn admit(&mut self, answer: &str) -> bool {
        if self.kept.iter().any(|seen| similarity(answer, seen) >= self.threshold) {
            return false;
        }
        self.kept.push(answer.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn retriever_is_shareable_across_threads() {
        assert_send_sync::<Retriever>();
        assert_send_sync::<RetrieverFactory>();
    }

    #[test]
    fn ranking_is_stable_on_ties() {
        assert_eq!(rank_descending(&[0.2, 0.5, 0.2, 0.5]), vec![1, 3, 0, 2]);
    }

    #[test]
    fn deduper_keeps_first_and_drops_near_copies() {
        let mut d = AnswerDeduper::new(0.85);
        assert!(d.admit("MBA fee is 2 lakh per year"));
        assert!(!d.admit("mba fee is 2 lakh per year."));
        assert!(d.admit("Hostel fee is 50k per year"));
    }

    #[test]
    fn zero_top_k_returns_nothing() {
        let r = RetrieverFactory::default().build(&[CorpusEntry::new("hostel fee", "50k")]);
        assert!(r.retrieve("hostel fee", &RetrieveParams::default().with_top_k(0)).is_empty());
        assert!(r.fuzzy_fallback("hostel fee", 0, 0.85).is_empty());
    }
}
