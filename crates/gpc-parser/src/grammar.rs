//! Grammar loading and validation.
//!
//! A grammar is plain text split into blocks by blank lines. The first line of
//! a block names a non-terminal and every following line is one alternative
//! production for it, written as symbol names separated by single spaces:
//!
//! ```text
//! Expr
//! NUM PLUS Expr
//! NUM
//!
//! Program
//! Expr SEMI
//! ```
//!
//! The first block declares the start symbol. Once built, a [`Grammar`] is
//! never mutated.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::io::{BufRead, BufReader};
use std::path::Path;

use gpc_tokens::{TerminalSet, TokenDefinition};

use crate::error::ConfigError;

/// A symbol occurring in a production.
///
/// `is_terminal` is decided once when the grammar is loaded. Equality and
/// hashing only look at the name.
#[derive(Debug, Clone)]
pub struct GrammarSymbol {
    pub name: String,
    pub is_terminal: bool,
}

impl GrammarSymbol {
    pub fn terminal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_terminal: true,
        }
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_terminal: false,
        }
    }

    fn classify(name: &str, terminals: &TerminalSet) -> Self {
        Self {
            name: name.to_string(),
            is_terminal: terminals.contains(name),
        }
    }
}

impl PartialEq for GrammarSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for GrammarSymbol {}

impl Hash for GrammarSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// The right-hand side of one alternative.
pub type Production = Vec<GrammarSymbol>;

/// Rule table plus start symbol.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<String, Vec<Production>>,
    /// Non-terminal names in declaration order
    order: Vec<String>,
    start: GrammarSymbol,
}

/// One block as read from the source, before validation.
struct Block {
    name: String,
    line: usize,
    productions: Vec<(usize, Production)>,
}

impl Grammar {
    /// Load a grammar file.
    pub fn load(path: impl AsRef<Path>, definitions: &[TokenDefinition]) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigError::io(path, e))?;

        Self::from_reader(BufReader::new(file), definitions).map_err(|e| match e {
            ConfigError::Read(source) => ConfigError::io(path, source),
            other => other,
        })
    }

    /// Build a grammar from in-memory text.
    pub fn parse_str(source: &str, definitions: &[TokenDefinition]) -> Result<Self, ConfigError> {
        Self::from_reader(source.as_bytes(), definitions)
    }

    /// Build a grammar from any line reader.
    pub fn from_reader<R: BufRead>(reader: R, definitions: &[TokenDefinition]) -> Result<Self, ConfigError> {
        let terminals = TerminalSet::from_definitions(definitions);
        let blocks = read_blocks(reader, &terminals)?;
        validate(&blocks, &terminals)?;

        let start = blocks
            .first()
            .map(|b| GrammarSymbol::non_terminal(b.name.as_str()))
            .ok_or(ConfigError::EmptyGrammar)?;

        let order: Vec<String> = blocks.iter().map(|b| b.name.clone()).collect();
        let rules = blocks
            .into_iter()
            .map(|b| {
                let productions = b.productions.into_iter().map(|(_, p)| p).collect();
                (b.name, productions)
            })
            .collect();

        tracing::debug!(
            start = %start.name,
            non_terminals = order.len(),
            "grammar loaded"
        );

        Ok(Self { rules, order, start })
    }

    /// The non-terminal named by the first block.
    pub fn start_symbol(&self) -> &GrammarSymbol {
        &self.start
    }

    /// Alternatives for `name`, in declaration order.
    pub fn productions(&self, name: &str) -> Option<&[Production]> {
        self.rules.get(name).map(Vec::as_slice)
    }

    pub fn is_non_terminal(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Declared non-terminals, in file order.
    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

fn read_blocks<R: BufRead>(reader: R, terminals: &TerminalSet) -> Result<Vec<Block>, ConfigError> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut declared: HashMap<String, usize> = HashMap::new();
    let mut in_block = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = index + 1;

        if line.is_empty() {
            in_block = false;
            continue;
        }

        if !in_block {
            if let Some(&first_line) = declared.get(line) {
                return Err(ConfigError::DuplicateNonTerminal {
                    name: line.to_string(),
                    line: line_no,
                    first_line,
                });
            }
            if terminals.contains(line) {
                tracing::warn!(
                    "non-terminal '{}' on line {} shares its name with a terminal; references to it match the terminal",
                    line,
                    line_no
                );
            }
            declared.insert(line.to_string(), line_no);
            blocks.push(Block {
                name: line.to_string(),
                line: line_no,
                productions: Vec::new(),
            });
            in_block = true;
            continue;
        }

        let production: Production = line
            .split(' ')
            .map(|name| GrammarSymbol::classify(name, terminals))
            .collect();
        if let Some(block) = blocks.last_mut() {
            block.productions.push((line_no, production));
        }
    }

    for block in &blocks {
        tracing::debug!(
            "{} (line {}): {} production(s)",
            block.name,
            block.line,
            block.productions.len()
        );
    }

    Ok(blocks)
}

/// Every symbol must name a declared non-terminal or a known terminal.
fn validate(blocks: &[Block], terminals: &TerminalSet) -> Result<(), ConfigError> {
    let non_terminals: HashSet<&str> = blocks.iter().map(|b| b.name.as_str()).collect();

    for block in blocks {
        for (line, production) in &block.productions {
            for symbol in production {
                if non_terminals.contains(symbol.name.as_str()) || terminals.contains(&symbol.name) {
                    continue;
                }
                return Err(ConfigError::UnknownSymbol {
                    symbol: symbol.name.clone(),
                    non_terminal: block.name.clone(),
                    line: *line,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(names: &[&str]) -> Vec<TokenDefinition> {
        names.iter().map(|n| TokenDefinition::new(*n, "")).collect()
    }

    #[test]
    fn test_single_block() {
        let grammar = Grammar::parse_str("Start\nNUM PLUS NUM\n", &defs(&["NUM", "PLUS"])).unwrap();

        assert_eq!(grammar.start_symbol().name, "Start");
        assert!(!grammar.start_symbol().is_terminal);

        let productions = grammar.productions("Start").unwrap();
        assert_eq!(productions.len(), 1);
        let names: Vec<&str> = productions[0].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["NUM", "PLUS", "NUM"]);
        assert!(productions[0].iter().all(|s| s.is_terminal));
    }

    #[test]
    fn test_alternatives_keep_declaration_order() {
        let source = "Expr\nNUM PLUS Expr\nNUM\nLPAREN Expr RPAREN\n";
        let grammar = Grammar::parse_str(source, &defs(&["NUM", "PLUS", "LPAREN", "RPAREN"])).unwrap();

        let productions = grammar.productions("Expr").unwrap();
        assert_eq!(productions.len(), 3);
        assert_eq!(productions[0].len(), 3);
        assert_eq!(productions[1].len(), 1);
        assert_eq!(productions[2][0].name, "LPAREN");
    }

    #[test]
    fn test_classification_is_cached_on_symbols() {
        let source = "Program\nExpr SEMI\n\nExpr\nNUM\n";
        let grammar = Grammar::parse_str(source, &defs(&["NUM", "SEMI"])).unwrap();

        let program = &grammar.productions("Program").unwrap()[0];
        assert!(!program[0].is_terminal);
        assert!(program[1].is_terminal);
    }

    #[test]
    fn test_start_symbol_is_first_block() {
        let source = "B\nA\n\nS\nB B\n";
        let grammar = Grammar::parse_str(source, &defs(&["A"])).unwrap();

        assert_eq!(grammar.start_symbol().name, "B");
        assert_eq!(grammar.non_terminals().collect::<Vec<_>>(), vec!["B", "S"]);
    }

    #[test]
    fn test_whitespace_only_lines_separate_blocks() {
        let source = "  S  \n\tA X\t\n   \t \nX\nA\n";
        let grammar = Grammar::parse_str(source, &defs(&["A"])).unwrap();

        assert!(grammar.is_non_terminal("S"));
        assert!(grammar.is_non_terminal("X"));
        assert_eq!(grammar.productions("S").unwrap()[0].len(), 2);
    }

    #[test]
    fn test_several_blank_lines_between_blocks() {
        let source = "\n\nS\nX\n\n\n\nX\nA\n\n";
        let grammar = Grammar::parse_str(source, &defs(&["A"])).unwrap();

        assert_eq!(grammar.start_symbol().name, "S");
        assert_eq!(grammar.non_terminals().count(), 2);
    }

    #[test]
    fn test_header_without_productions() {
        let grammar = Grammar::parse_str("S\nA\n\nNever\n", &defs(&["A"])).unwrap();
        assert_eq!(grammar.productions("Never").map(<[Production]>::len), Some(0));
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let err = Grammar::parse_str("S\nA FOO\n", &defs(&["A"])).unwrap_err();

        match err {
            ConfigError::UnknownSymbol { symbol, non_terminal, line } => {
                assert_eq!(symbol, "FOO");
                assert_eq!(non_terminal, "S");
                assert_eq!(line, 2);
            }
            other => panic!("Expected UnknownSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_symbol_in_unreachable_block() {
        // Validation covers every block, reachable from the start symbol or not.
        let source = "S\nA\n\nOrphan\nBAR\n";
        let err = Grammar::parse_str(source, &defs(&["A"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSymbol { ref symbol, .. } if symbol == "BAR"));
    }

    #[test]
    fn test_forward_reference_is_allowed() {
        let source = "S\nLater A\n\nLater\nA\n";
        assert!(Grammar::parse_str(source, &defs(&["A"])).is_ok());
    }

    #[test]
    fn test_double_space_yields_empty_symbol() {
        let err = Grammar::parse_str("S\nA  A\n", &defs(&["A"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSymbol { ref symbol, .. } if symbol.is_empty()));
    }

    #[test]
    fn test_terminal_names_are_case_sensitive() {
        let err = Grammar::parse_str("S\nnum\n", &defs(&["NUM"])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSymbol { ref symbol, .. } if symbol == "num"));
    }

    #[test]
    fn test_duplicate_block_is_rejected() {
        let source = "S\nA\n\nX\nA\n\nS\nA A\n";
        let err = Grammar::parse_str(source, &defs(&["A"])).unwrap_err();

        match err {
            ConfigError::DuplicateNonTerminal { name, line, first_line } => {
                assert_eq!(name, "S");
                assert_eq!(line, 7);
                assert_eq!(first_line, 1);
            }
            other => panic!("Expected DuplicateNonTerminal, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_source_has_no_start_symbol() {
        assert!(matches!(
            Grammar::parse_str("", &defs(&["A"])),
            Err(ConfigError::EmptyGrammar)
        ));
        assert!(matches!(
            Grammar::parse_str("\n  \n\n", &defs(&["A"])),
            Err(ConfigError::EmptyGrammar)
        ));
    }

    #[test]
    fn test_symbol_equality_ignores_classification() {
        assert_eq!(GrammarSymbol::terminal("X"), GrammarSymbol::non_terminal("X"));
        assert_ne!(GrammarSymbol::terminal("X"), GrammarSymbol::terminal("Y"));
    }
}
