use asksol_core::corpus::Corpus;
use asksol_text::similarity;

/// Finds the course a query is about, if any.
#[derive(Debug, Clone, Default)]
pub struct CourseDetector {
    names: Vec<String>,
    threshold: f64,
}

impl CourseDetector {
    /// `names` should already be trimmed and lowercased.
    pub fn new(names: Vec<String>, threshold: f64) -> Self { Self { names, threshold } }

    pub fn from_corpus(corpus: &Corpus, threshold: f64) -> Self { Self::new(corpus.course_names(), threshold) }

    /// The first course name that appears verbatim in the lowercased query
    /// wins outright. Otherwise the most similar name is returned when its
    /// similarity to the whole query reaches the threshold.
    pub fn detect(&self, query: &str) -> Option<&str> {
        let q = query.to_lowercase();
        let mut best: Option<(&str, f64)> = None;
        for name in &self.names {
            if q.contains(name.as_str()) {
                return Some(name.as_str());
            }
            let score = similarity(&q, name);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((name.as_str(), score));
            }
        }
        best.filter(|&(_, s)| s >= self.threshold).map(|(name, _)| name)
    }

    pub fn names(&self) -> &[String] { &self.names }

    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}
