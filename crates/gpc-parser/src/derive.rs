//! Naive recursive backtracking derivation.
//!
//! Each non-terminal tries its productions in declaration order and commits to
//! the first one whose symbols all derive. Failed alternatives are retried from
//! scratch with no memoization, so the worst case is exponential in the number
//! of tokens. Left-recursive rules recurse until the stack is exhausted.

use gpc_tokens::Token;

use crate::error::DerivationFailure;
use crate::grammar::{Grammar, GrammarSymbol, Production};
use crate::tree::ParseTree;

/// Whether an attempt is the root goal of the whole derivation. Only the root
/// goal has to consume every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Root,
    Nested,
}

/// Derives token sequences against a borrowed grammar. Holds no mutable state,
/// so one grammar can serve any number of derivers.
pub struct Deriver<'a> {
    grammar: &'a Grammar,
    tokens: &'a [Token],
}

impl<'a> Deriver<'a> {
    pub fn new(grammar: &'a Grammar, tokens: &'a [Token]) -> Self {
        Self { grammar, tokens }
    }

    /// Derive the full token sequence from the grammar's start symbol.
    pub fn derive(&self) -> Result<ParseTree, DerivationFailure> {
        let start = self.grammar.start_symbol();

        match self.attempt(start, 0, Goal::Root) {
            Some((tree, _)) => Ok(tree),
            None => {
                tracing::debug!(
                    "no derivation of {} covers {} token(s)",
                    start.name,
                    self.tokens.len()
                );
                Err(DerivationFailure {
                    start: start.name.clone(),
                    token_count: self.tokens.len(),
                })
            }
        }
    }

    /// Try to derive `symbol` starting at token `index`.
    ///
    /// Returns the subtree and the index just past the tokens it consumed. The
    /// end-of-input requirement is not applied here, even for the start symbol.
    pub fn try_derive(&self, symbol: &GrammarSymbol, index: usize) -> Option<(ParseTree, usize)> {
        self.attempt(symbol, index, Goal::Nested)
    }

    fn attempt(&self, symbol: &GrammarSymbol, index: usize, goal: Goal) -> Option<(ParseTree, usize)> {
        if symbol.is_terminal {
            return self.match_terminal(symbol, index);
        }

        let productions = self.grammar.productions(&symbol.name)?;
        for (alternative, production) in productions.iter().enumerate() {
            let Some((children, next)) = self.attempt_production(production, index) else {
                tracing::trace!("{} alternative {} failed at token {}", symbol.name, alternative, index);
                continue;
            };

            if goal == Goal::Root && next != self.tokens.len() {
                tracing::trace!(
                    "{} alternative {} stopped at token {} of {}",
                    symbol.name,
                    alternative,
                    next,
                    self.tokens.len()
                );
                continue;
            }

            tracing::trace!("{} alternative {} derived tokens {}..{}", symbol.name, alternative, index, next);
            return Some((ParseTree::branch(symbol.name.as_str(), children), next));
        }

        None
    }

    /// All symbols of `production` in sequence, or nothing. A failing symbol
    /// abandons the whole production.
    fn attempt_production(&self, production: &Production, index: usize) -> Option<(Vec<ParseTree>, usize)> {
        let mut children = Vec::with_capacity(production.len());
        let mut next = index;

        for symbol in production {
            let (child, after) = self.attempt(symbol, next, Goal::Nested)?;
            children.push(child);
            next = after;
        }

        Some((children, next))
    }

    fn match_terminal(&self, symbol: &GrammarSymbol, index: usize) -> Option<(ParseTree, usize)> {
        let token = self.tokens.get(index)?;
        if token.name != symbol.name {
            return None;
        }
        Some((ParseTree::leaf(token), index + 1))
    }
}

/// Derive `tokens` from `grammar`'s start symbol.
pub fn derive(grammar: &Grammar, tokens: &[Token]) -> Result<ParseTree, DerivationFailure> {
    Deriver::new(grammar, tokens).derive()
}
