use serde::Serialize;
use tracing::{debug, info};

use asksol_core::config::{AnswerSettings, Settings};
use asksol_core::corpus::Corpus;
use asksol_core::types::ScoredResult;
use asksol_core::{Error, Result};
use asksol_retrieval::{RetrieveParams, Retriever, RetrieverFactory};
use asksol_text::Thesaurus;

use crate::course::CourseDetector;
use crate::format::{format_as_bullets, looks_like_course_list};
use crate::intent::{detect_intent, Intent};

const NO_ANSWER: &str = "Sorry, I don't have an answer. Try rephrasing.";

/// Where a reply came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ReplySource {
    Intent(Intent),
    /// Scoped retrieval over the entries of the named course.
    Course(String),
    Retrieval,
    Fuzzy,
    NoAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub answer: String,
    /// 0..=10
    pub confidence: u8,
    pub source: ReplySource,
}

/// Answers free-form questions against one corpus.
///
/// The global retriever is built once at construction. Course-scoped
/// retrievers are built per request from the same factory and dropped
/// afterwards.
pub struct Assistant {
    corpus: Corpus,
    factory: RetrieverFactory,
    global: Retriever,
    courses: CourseDetector,
    settings: AnswerSettings,
    dedupe_threshold: f64,
}

impl Assistant {
    pub fn new(corpus: Corpus, factory: RetrieverFactory, settings: AnswerSettings, dedupe_threshold: f64) -> Self {
        let global = factory.build(corpus.entries());
        let courses = CourseDetector::from_corpus(&corpus, settings.course_match_threshold);
        info!(
            entries = global.len(),
            features = global.vocabulary_len(),
            courses = courses.names().len(),
            "assistant ready"
        );
        Self { corpus, factory, global, courses, settings, dedupe_threshold }
    }

    pub fn from_settings(corpus: Corpus, settings: &Settings, thesaurus: Option<&Thesaurus>) -> Result<Self> {
        settings.validate()?;
        let factory = RetrieverFactory::from_settings(&settings.retrieval, thesaurus);
        Ok(Self::new(corpus, factory, settings.answer.clone(), settings.retrieval.dedupe_threshold))
    }

    pub fn ask(&self, query: &str) -> Result<Reply> {
        let q = query.trim();
        if q.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let intent = detect_intent(q);
        if let Some((answer, confidence)) = intent.canned_reply() {
            debug!(?intent, "canned reply");
            return Ok(Reply { answer: answer.to_string(), confidence, source: ReplySource::Intent(intent) });
        }

        if let Some(course) = self.courses.detect(q) {
            let subset = self.corpus.entries_for_course(course);
            if !subset.is_empty() {
                debug!(course, entries = subset.len(), "course-scoped retrieval");
                let scoped = self.factory.build_owned(subset);
                let params = self.params(self.settings.course_top_k);
                if let Some(top) = scoped.retrieve(q, &params).considered.into_iter().next() {
                    return Ok(self.reply(&top, ReplySource::Course(course.to_string())));
                }
            }
        }

        let params = self.params(self.settings.global_top_k);
        if let Some(top) = self.global.retrieve(q, &params).considered.into_iter().next() {
            return Ok(self.reply(&top, ReplySource::Retrieval));
        }
        if let Some(top) = self.global.fuzzy_fallback(q, 1, self.dedupe_threshold).into_iter().next() {
            return Ok(self.reply(&top, ReplySource::Fuzzy));
        }
        Ok(Reply { answer: NO_ANSWER.to_string(), confidence: 0, source: ReplySource::NoAnswer })
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn retriever(&self) -> &Retriever { &self.global }

    pub fn courses(&self) -> &CourseDetector { &self.courses }

    fn params(&self, top_k: usize) -> RetrieveParams {
        RetrieveParams { top_k, threshold: 0.0, dedupe_threshold: self.dedupe_threshold }
    }

    fn reply(&self, top: &ScoredResult, source: ReplySource) -> Reply {
        let mut answer = top.answer.trim().to_string();
        if self.settings.bullet_course_lists && looks_like_course_list(&answer) {
            answer = format_as_bullets(&answer);
        }
        Reply { answer, confidence: top.confidence(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Assistant>();
    }

    #[test]
    fn empty_corpus_apologizes() {
        let a = Assistant::new(Corpus::default(), RetrieverFactory::default(), AnswerSettings::default(), 0.85);
        let reply = a.ask("what is the exam schedule").unwrap();
        assert_eq!(reply.source, ReplySource::NoAnswer);
        assert_eq!(reply.confidence, 0);
    }
}
