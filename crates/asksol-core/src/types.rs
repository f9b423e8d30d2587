//! Domain types shared by the retrieval and answer layers.

use serde::{Deserialize, Serialize};

/// One question/answer pair of the corpus.
///
/// - `question`/`answer`: raw text as loaded, never normalized in place
/// - `course`: optional course name the pair belongs to; only the
///   course-scoping layer looks at it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

impl CorpusEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into(), course: None }
    }

    #[must_use]
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }
}

/// A ranked match for a single query.
///
/// `score` lies in `[0, 1]` and is only comparable with other results
/// produced by the same retriever instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub score: f64,
    pub question: String,
    pub answer: String,
}

impl ScoredResult {
    /// Integer confidence on a 0..=10 scale: `clamp(score, 0, 1) * 10`,
    /// rounded half to even.
    pub fn confidence(&self) -> u8 {
        confidence_from_score(self.score)
    }
}

// clamped * 10 is within [0, 10], the cast cannot truncate
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn confidence_from_score(score: f64) -> u8 {
    let clamped = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
    (clamped * 10.0).round_ties_even() as u8
}

/// Output of one vector retrieval.
///
/// `considered` holds every deduplicated candidate above the score floor,
/// sorted by descending score; `accepted` is the prefix of it that met the
/// acceptance threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Retrieval {
    pub accepted: Vec<ScoredResult>,
    pub considered: Vec<ScoredResult>,
}

impl Retrieval {
    pub fn best(&self) -> Option<&ScoredResult> { self.considered.first() }

    pub fn is_empty(&self) -> bool { self.considered.is_empty() }
}
