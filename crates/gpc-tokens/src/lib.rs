//! Token types shared between a tokenizer and the gpc parser.
//!
//! Tokenization itself happens elsewhere. This crate only describes what a
//! tokenizer hands over: the terminal definitions it recognizes and the
//! classified tokens it produced.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A terminal category known to the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDefinition {
    pub name: String,
    /// Recognition pattern used by the tokenizer. The parser never reads it.
    #[serde(default)]
    pub pattern: String,
}

impl TokenDefinition {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// A classified token: `name` matches some [`TokenDefinition`], `value` is the
/// literal text it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub value: String,
}

impl Token {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Name lookup over a set of terminal definitions.
#[derive(Debug, Clone, Default)]
pub struct TerminalSet {
    names: HashSet<String>,
}

impl TerminalSet {
    pub fn from_definitions(definitions: &[TokenDefinition]) -> Self {
        Self {
            names: definitions.iter().map(|d| d.name.clone()).collect(),
        }
    }

    /// Exact, case-sensitive name match.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Errors raised while reading token or definition files.
#[derive(Error, Debug)]
pub enum TokenFileError {
    #[error("Unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read terminal definitions from a JSON array of `{"name", "pattern"}` objects.
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<TokenDefinition>, TokenFileError> {
    read_json(path.as_ref())
}

/// Read a token sequence from a JSON array of `{"name", "value"}` objects.
pub fn load_tokens(path: impl AsRef<Path>) -> Result<Vec<Token>, TokenFileError> {
    read_json(path.as_ref())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TokenFileError> {
    let text = fs::read_to_string(path).map_err(|source| TokenFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TokenFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_set_exact_match() {
        let defs = vec![
            TokenDefinition::new("NUM", "[0-9]+"),
            TokenDefinition::new("PLUS", r"\+"),
        ];
        let set = TerminalSet::from_definitions(&defs);

        assert_eq!(set.len(), 2);
        assert!(set.contains("NUM"));
        assert!(set.contains("PLUS"));
        assert!(!set.contains("num"));
        assert!(!set.contains("NUM "));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_empty_terminal_set() {
        let set = TerminalSet::from_definitions(&[]);
        assert!(set.is_empty());
        assert!(!set.contains("A"));
    }

    #[test]
    fn test_definition_pattern_is_optional() {
        let defs: Vec<TokenDefinition> = serde_json::from_str(r#"[{"name": "ID"}]"#).unwrap();
        assert_eq!(defs, vec![TokenDefinition::new("ID", "")]);
    }
}
