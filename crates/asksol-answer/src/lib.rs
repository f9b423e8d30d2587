//! asksol-answer
//!
//! Turns a raw user question into a single reply: canned intents first, then
//! course-scoped retrieval, global retrieval and the fuzzy fallback.

pub mod assistant;
pub mod course;
pub mod format;
pub mod intent;

pub use assistant::{Assistant, Reply, ReplySource};
pub use course::CourseDetector;
pub use intent::{detect_intent, Intent};
