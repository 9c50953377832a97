/// gpc parser
///
/// Builds a parse tree for an already tokenized input from a plain-text
/// grammar, using naive recursive backtracking.

pub mod derive;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod tree;
pub mod tree_dump;

pub use derive::{derive, Deriver};
pub use driver::{Driver, ParseOptions, ParseOutput};
pub use error::{ConfigError, DerivationFailure, ParseError, Result};
pub use grammar::{Grammar, GrammarSymbol, Production};
pub use tree::{ParseNode, ParseTree};
pub use tree_dump::dump_tree;

pub use gpc_tokens::{Token, TokenDefinition};

use std::path::Path;

/// Load the grammar at `grammar_file` and derive `tokens` with it.
///
/// Grammar errors are reported before any derivation is attempted.
pub fn parse(definitions: &[TokenDefinition], tokens: &[Token], grammar_file: impl AsRef<Path>) -> Result<ParseTree> {
    let grammar = Grammar::load(grammar_file, definitions)?;
    Ok(derive(&grammar, tokens)?)
}
