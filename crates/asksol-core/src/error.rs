use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed corpus record in {path}: {reason}")]
    CorpusFormat { path: PathBuf, reason: String },

    #[error("Corpus length mismatch: {questions} questions vs {answers} answers")]
    CorpusMismatch { questions: usize, answers: usize },

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Lemmatization failed for '{0}'")]
    Lemma(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
