/// Parse driver that runs the file-based load-then-derive pipeline

use std::path::PathBuf;

use gpc_tokens::{load_definitions, load_tokens};

use crate::derive::derive;
use crate::error::Result;
use crate::grammar::Grammar;
use crate::tree::ParseTree;

/// Result of a successful run
#[derive(Debug)]
pub struct ParseOutput {
    /// Grammar file the tree was derived with
    pub grammar_file: PathBuf,
    /// Start symbol of that grammar
    pub start_symbol: String,
    pub tree: ParseTree,
}

/// Options for a parse run
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Grammar source file
    pub grammar: PathBuf,
    /// JSON terminal definitions (defaults to `terminals.json` beside the grammar)
    pub terminals: Option<PathBuf>,
    /// JSON token sequence (defaults to `tokens.json` beside the grammar)
    pub tokens: Option<PathBuf>,
    /// Whether to report progress on stderr
    pub verbose: bool,
}

impl ParseOptions {
    pub fn new(grammar: impl Into<PathBuf>) -> Self {
        Self {
            grammar: grammar.into(),
            terminals: None,
            tokens: None,
            verbose: false,
        }
    }

    pub fn terminals(mut self, path: impl Into<PathBuf>) -> Self {
        self.terminals = Some(path.into());
        self
    }

    pub fn tokens(mut self, path: impl Into<PathBuf>) -> Self {
        self.tokens = Some(path.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn sibling(&self, file_name: &str) -> PathBuf {
        self.grammar.with_file_name(file_name)
    }

    fn terminals_path(&self) -> PathBuf {
        self.terminals.clone().unwrap_or_else(|| self.sibling("terminals.json"))
    }

    fn tokens_path(&self) -> PathBuf {
        self.tokens.clone().unwrap_or_else(|| self.sibling("tokens.json"))
    }
}

/// Runs one parse according to its options
pub struct Driver {
    options: ParseOptions,
}

impl Driver {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Load terminals, tokens and grammar, then derive the tree.
    pub fn run(&self) -> Result<ParseOutput> {
        let definitions = load_definitions(self.options.terminals_path())?;
        let tokens = load_tokens(self.options.tokens_path())?;

        if self.options.verbose {
            eprintln!(
                "Loaded {} terminal definition(s) and {} token(s)",
                definitions.len(),
                tokens.len()
            );
        }

        let grammar = Grammar::load(&self.options.grammar, &definitions)?;

        if self.options.verbose {
            eprintln!(
                "Grammar {}: {} non-terminal(s), start symbol {}",
                self.options.grammar.display(),
                grammar.non_terminals().count(),
                grammar.start_symbol().name
            );
        }

        let tree = derive(&grammar, &tokens)?;

        if self.options.verbose {
            eprintln!("Derivation successful: tree depth {}", tree.depth());
        }

        Ok(ParseOutput {
            grammar_file: self.options.grammar.clone(),
            start_symbol: grammar.start_symbol().name.clone(),
            tree,
        })
    }
}
