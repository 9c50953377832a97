/// Error types for grammar loading and derivation

use std::path::PathBuf;
use gpc_tokens::TokenFileError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Any failure of the load-then-derive pipeline.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Derivation(#[from] DerivationFailure),

    #[error(transparent)]
    Tokens(#[from] TokenFileError),
}

/// The grammar could not be read or does not validate. Raised before any
/// derivation is attempted.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to open grammar file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read grammar source: {0}")]
    Read(#[from] std::io::Error),

    #[error("Unknown symbol in grammar: '{symbol}' (in a production of {non_terminal}, line {line})")]
    UnknownSymbol {
        symbol: String,
        non_terminal: String,
        line: usize,
    },

    #[error("Non-terminal '{name}' redeclared on line {line} (first declared on line {first_line})")]
    DuplicateNonTerminal {
        name: String,
        line: usize,
        first_line: usize,
    },

    #[error("Grammar declares no non-terminals, so it has no start symbol")]
    EmptyGrammar,
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

/// No production of the start symbol derives the whole token sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not create parse tree: no derivation of '{start}' covers all {token_count} tokens")]
pub struct DerivationFailure {
    pub start: String,
    pub token_count: usize,
}
