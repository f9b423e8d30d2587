//! Corpus loading: CSV, JSON or JSONL question-answer records, one file or a
//! directory tree of them.
//!
//! Records (CSV rows keyed by header) are accepted with case-insensitive
//! `question` / `answer` keys and an
//! optional `course_name` (or `course`). Records missing either text are
//! dropped, then exact `(question, answer)` duplicates are removed keeping the
//! first occurrence.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::CorpusEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Deduplicate by `(question, answer)`, keeping the first occurrence.
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        let mut seen: HashSet<(String, String)> = HashSet::with_capacity(entries.len());
        let before = entries.len();
        let entries: Vec<CorpusEntry> = entries
            .into_iter()
            .filter(|e| seen.insert((e.question.clone(), e.answer.clone())))
            .collect();
        if entries.len() < before {
            info!(dropped = before - entries.len(), "removed duplicate question/answer pairs");
        }
        Self { entries }
    }

    /// Build from parallel sequences. Rejects sequences of different length.
    pub fn from_parallel<Q, A>(questions: Vec<Q>, answers: Vec<A>) -> Result<Self>
    where
        Q: Into<String>,
        A: Into<String>,
    {
        if questions.len() != answers.len() {
            return Err(Error::CorpusMismatch { questions: questions.len(), answers: answers.len() });
        }
        let entries = questions.into_iter().zip(answers).map(|(q, a)| CorpusEntry::new(q, a)).collect();
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[CorpusEntry] { &self.entries }

    pub fn into_entries(self) -> Vec<CorpusEntry> { self.entries }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn questions(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(|e| e.question.as_str()) }

    pub fn answers(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(|e| e.answer.as_str()) }

    /// Unique course names, trimmed and lowercased, in first-seen order.
    /// Blank names and `n/a` are skipped.
    pub fn course_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for course in self.entries.iter().filter_map(|e| e.course.as_deref()) {
            let name = course.trim().to_lowercase();
            if name.is_empty() || name == "n/a" { continue; }
            if seen.insert(name.clone()) { out.push(name); }
        }
        out
    }

    /// Entries whose course name contains `name` (case-insensitive substring).
    pub fn entries_for_course(&self, name: &str) -> Vec<CorpusEntry> {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.course.as_deref().is_some_and(|c| c.to_lowercase().contains(&needle)))
            .cloned()
            .collect()
    }
}

/// Load a corpus from a `.csv` / `.json` / `.jsonl` file or from every such
/// file under a directory (sorted by path).
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    if !path.exists() {
        return Err(Error::NotFound(format!("corpus path {}", path.display())));
    }
    let files = if path.is_dir() { list_corpus_files(path) } else { vec![path.to_path_buf()] };
    let mut entries = Vec::new();
    for file in &files {
        let loaded = load_file(file)?;
        info!(file = %file.display(), records = loaded.len(), "loaded corpus file");
        entries.extend(loaded);
    }
    let corpus = Corpus::new(entries);
    info!(files = files.len(), entries = corpus.len(), "corpus ready");
    Ok(corpus)
}

fn list_corpus_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("csv" | "json" | "jsonl")))
        .collect();
    files.sort();
    files
}

fn load_file(path: &Path) -> Result<Vec<CorpusEntry>> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    let extension = path.extension().and_then(|s| s.to_str());
    let values: Vec<Value> = if extension == Some("csv") {
        csv_records(path, &content)?
    } else if extension == Some("jsonl") {
        let mut values = Vec::new();
        for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            values.push(serde_json::from_str(line).map_err(|source| Error::Json { path: path.to_path_buf(), source })?);
        }
        values
    } else {
        match serde_json::from_str(&content).map_err(|source| Error::Json { path: path.to_path_buf(), source })? {
            Value::Array(items) => items,
            _ => {
                return Err(Error::CorpusFormat { path: path.to_path_buf(), reason: "expected a JSON array of records".into() });
            }
        }
    };

    let mut entries = Vec::with_capacity(values.len());
    for (line, value) in values.into_iter().enumerate() {
        let Value::Object(map) = value else {
            return Err(Error::CorpusFormat { path: path.to_path_buf(), reason: format!("record {} is not an object", line + 1) });
        };
        match record_to_entry(&map) {
            Some(entry) => entries.push(entry),
            None => warn!(file = %path.display(), record = line + 1, "skipping record without question/answer"),
        }
    }
    Ok(entries)
}

/// Each row becomes a JSON object keyed by the header, so CSV goes through
/// the same record validation as JSON.
fn csv_records(path: &Path, content: &str) -> Result<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(content.as_bytes());
    let mut values = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        let row = row.map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;
        values.push(Value::Object(row.into_iter().map(|(k, v)| (k, Value::String(v))).collect()));
    }
    Ok(values)
}

fn record_to_entry(map: &Map<String, Value>) -> Option<CorpusEntry> {
    let question = text_field(map, &["question"])?;
    let answer = text_field(map, &["answer"])?;
    let mut entry = CorpusEntry::new(question, answer);
    entry.course = text_field(map, &["course_name", "course"]);
    Some(entry)
}

fn text_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let value = map.iter().find(|(k, _)| keys.iter().any(|key| k.trim().eq_ignore_ascii_case(key))).map(|(_, v)| v)?;
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.trim().is_empty() { None } else { Some(text) }
}
