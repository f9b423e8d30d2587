//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_RETRIEVAL__TOP_K=3`). Typed settings
//! are extracted with serde defaults, so an empty configuration is valid.
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    /// Build from an in-memory TOML document layered over the defaults.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(toml));
        let config = Self { figment };
        config.validate_for_env("test")?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        let settings = self.settings()?;
        settings.validate()?;
        match env {
            "prod" | "production" => {
                if settings.data.corpus_path.trim().is_empty() {
                    return Err(Error::InvalidConfig("prod config needs data.corpus_path".into()).into());
                }
            }
            "dev" | "development" | "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub retrieval: RetrievalSettings,
    pub answer: AnswerSettings,
}

impl Settings {
    pub fn validate(&self) -> crate::error::Result<()> {
        self.retrieval.validate()?;
        self.answer.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// JSON/JSONL file or a directory of them.
    pub corpus_path: String,
    /// Optional synonym thesaurus (JSON).
    pub thesaurus_path: Option<String>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { corpus_path: "data/college_qa.jsonl".to_string(), thesaurus_path: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// `\b[a-z0-9]+\b` over lowercased text.
    #[default]
    Baseline,
    /// Unicode-aware alphanumeric splitting.
    Unicode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub threshold: f64,
    pub dedupe_threshold: f64,
    pub fallback_top_k: usize,
    pub max_features: usize,
    pub use_stop_words: bool,
    pub use_lemmatizer: bool,
    pub use_synonyms: bool,
    pub tokenizer: TokenizerKind,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 5,
            threshold: 0.25,
            dedupe_threshold: 0.85,
            fallback_top_k: 3,
            max_features: 20_000,
            use_stop_words: true,
            use_lemmatizer: true,
            use_synonyms: false,
            tokenizer: TokenizerKind::Baseline,
        }
    }
}

impl RetrievalSettings {
    pub fn validate(&self) -> crate::error::Result<()> {
        check_unit("retrieval.threshold", self.threshold)?;
        check_unit("retrieval.dedupe_threshold", self.dedupe_threshold)?;
        if self.top_k == 0 || self.fallback_top_k == 0 {
            return Err(Error::InvalidConfig("retrieval.top_k and retrieval.fallback_top_k must be > 0".into()));
        }
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("retrieval.max_features must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerSettings {
    pub course_match_threshold: f64,
    pub course_top_k: usize,
    pub global_top_k: usize,
    pub bullet_course_lists: bool,
}

impl Default for AnswerSettings {
    fn default() -> Self {
        Self { course_match_threshold: 0.65, course_top_k: 3, global_top_k: 5, bullet_course_lists: true }
    }
}

impl AnswerSettings {
    pub fn validate(&self) -> crate::error::Result<()> {
        check_unit("answer.course_match_threshold", self.course_match_threshold)?;
        if self.course_top_k == 0 || self.global_top_k == 0 {
            return Err(Error::InvalidConfig("answer.course_top_k and answer.global_top_k must be > 0".into()));
        }
        Ok(())
    }
}

fn check_unit(key: &str, value: f64) -> crate::error::Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{key} must be within [0, 1], got {value}")))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
