//! Correction dictionaries.
//!
//! Built-in tables live in [`builtin`]; a user dictionary can be loaded
//! from YAML, JSON or a plain word list and merged on top of them.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

/// What a dictionary key should be replaced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correction {
    /// Exactly one correct form
    Single(String),
    /// Several acceptable forms
    Alternatives(Vec<String>),
    /// Listed without a specific correction (word lists, `true` values)
    Flagged,
    /// Any other structured value; kept but ignored by every rule
    Unsupported,
}

impl Correction {
    /// The correct form, if this entry names exactly one
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Correction::Single(s) => Some(s),
            _ => None,
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Correction::Single(s),
            Value::Bool(true) => Correction::Flagged,
            Value::Array(items) => {
                let forms: Option<Vec<String>> = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect();
                forms.map(Correction::Alternatives).unwrap_or(Correction::Unsupported)
            }
            _ => Correction::Unsupported,
        }
    }
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in dictionary {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in dictionary {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary {path} must be a mapping of terms")]
    NotAMapping { path: PathBuf },
}

/// Insertion-ordered mapping from an incorrect form to its correction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: IndexMap<String, Correction>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(incorrect, correct)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut dict = Self::new();
        for (incorrect, correct) in pairs {
            dict.insert(incorrect, Correction::Single(correct.to_string()));
        }
        dict
    }

    /// Insert or replace an entry; a replaced key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, correction: Correction) {
        self.entries.insert(key.into(), correction);
    }

    pub fn get(&self, key: &str) -> Option<&Correction> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Correction)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Entries that name exactly one correct form, in dictionary order
    pub fn single_corrections(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|(k, c)| c.as_single().map(|correct| (k, correct)))
    }

    /// Layer `other` on top of `self`; `other` wins on identical keys
    pub fn merge(mut self, other: Dictionary) -> Self {
        for (key, correction) in other.entries {
            self.insert(key, correction);
        }
        self
    }

    /// Load a user dictionary, falling back to an empty one.
    ///
    /// Never fails: a missing path yields an empty dictionary silently,
    /// unreadable or malformed files are logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
            return Self::new();
        };
        if !path.exists() {
            tracing::debug!("Dictionary {} not found, using built-in rules only", path.display());
            return Self::new();
        }

        match Self::try_load(path) {
            Ok(dict) => {
                tracing::info!("Loaded {} dictionary entries from {}", dict.len(), path.display());
                dict
            }
            Err(e) => {
                tracing::warn!("Failed to load dictionary, ignoring it: {}", e);
                Self::new()
            }
        }
    }

    /// Load a user dictionary, reporting read and parse failures.
    ///
    /// The format follows the extension: `yml`/`yaml`, `json`, anything
    /// else is a word list with one flagged term per non-blank line.
    pub fn try_load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let value = match ext.as_str() {
            "yml" | "yaml" if content.trim().is_empty() => Value::Null,
            "yml" | "yaml" => {
                serde_yaml::from_str::<Value>(&content).map_err(|source| DictionaryError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            "json" => {
                serde_json::from_str::<Value>(&content).map_err(|source| DictionaryError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => return Ok(Self::from_word_list(&content)),
        };

        match value {
            Value::Object(map) => {
                let mut dict = Self::new();
                for (key, value) in map {
                    dict.insert(key, Correction::from_value(value));
                }
                Ok(dict)
            }
            Value::Null => Ok(Self::new()),
            _ => Err(DictionaryError::NotAMapping {
                path: path.to_path_buf(),
            }),
        }
    }

    fn from_word_list(content: &str) -> Self {
        let mut dict = Self::new();
        for word in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
            dict.insert(word, Correction::Flagged);
        }
        dict
    }
}

/// Built-in correction tables.
///
/// Constructed on demand and handed to the checkers by value; nothing
/// here is shared mutable state. Entries mapping a term to itself
/// (`Docker` to `Docker`) record the canonical spelling only; the
/// checkers skip them, as such a match is never a misspelling.
pub mod builtin {
    use super::Dictionary;

    /// Miscapitalized technical terms
    pub fn tech_terms() -> Dictionary {
        Dictionary::from_pairs([
            ("Javascript", "JavaScript"),
            ("javascript", "JavaScript"),
            ("Github", "GitHub"),
            ("github", "GitHub"),
            ("Nodejs", "Node.js"),
            ("nodejs", "Node.js"),
            ("Reactjs", "React.js"),
            ("reactjs", "React.js"),
            ("Vuejs", "Vue.js"),
            ("vuejs", "Vue.js"),
            ("Typescript", "TypeScript"),
            ("typescript", "TypeScript"),
            ("Html", "HTML"),
            ("Css", "CSS"),
            ("Api", "API"),
            ("Url", "URL"),
            ("Json", "JSON"),
            ("Xml", "XML"),
            ("Sql", "SQL"),
            ("Aws", "AWS"),
            ("Gcp", "GCP"),
            ("Ios", "iOS"),
            ("Macos", "macOS"),
            ("Mysql", "MySQL"),
            ("Postgresql", "PostgreSQL"),
            ("Redis", "Redis"),
            ("Docker", "Docker"),
            ("Kubernetes", "Kubernetes"),
            ("Webpack", "webpack"),
            ("Eslint", "ESLint"),
            ("Prettier", "Prettier"),
        ])
    }

    /// Proper nouns with their canonical spelling; user dictionaries merge on top
    pub fn proper_nouns() -> Dictionary {
        Dictionary::from_pairs([
            ("github", "GitHub"),
            ("Github", "GitHub"),
            ("javascript", "JavaScript"),
            ("Javascript", "JavaScript"),
            ("typescript", "TypeScript"),
            ("Typescript", "TypeScript"),
            ("nodejs", "Node.js"),
            ("Nodejs", "Node.js"),
            ("reactjs", "React.js"),
            ("Reactjs", "React.js"),
            ("vuejs", "Vue.js"),
            ("Vuejs", "Vue.js"),
            ("webpack", "webpack"),
            ("Webpack", "webpack"),
            ("eslint", "ESLint"),
            ("Eslint", "ESLint"),
            ("aws", "AWS"),
            ("Aws", "AWS"),
            ("gcp", "GCP"),
            ("Gcp", "GCP"),
            ("mysql", "MySQL"),
            ("Mysql", "MySQL"),
            ("postgresql", "PostgreSQL"),
            ("Postgresql", "PostgreSQL"),
            ("redis", "Redis"),
            ("docker", "Docker"),
            ("kubernetes", "Kubernetes"),
            ("Kubernetes", "Kubernetes"),
            ("ios", "iOS"),
            ("Ios", "iOS"),
            ("macos", "macOS"),
            ("Macos", "macOS"),
            ("MacOS", "macOS"),
        ])
    }

    /// Japanese phrases with a preferred spelling (mostly kanji to kana)
    pub fn japanese_phrases() -> Vec<(String, String)> {
        [
            ("以下の通りです。", "以下のとおりです。"),
            ("通り", "とおり"),
            ("既に", "すでに"),
            ("全て", "すべて"),
            ("更に", "さらに"),
            ("殆ど", "ほとんど"),
            ("何故", "なぜ"),
            ("何処", "どこ"),
            ("何時", "いつ"),
            ("其の", "その"),
            ("此の", "この"),
            ("彼の", "あの"),
        ]
        .into_iter()
        .map(|(typo, correct)| (typo.to_string(), correct.to_string()))
        .collect()
    }
}
