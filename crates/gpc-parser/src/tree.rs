//! Parse tree produced by a successful derivation.

use gpc_tokens::Token;
use serde::Serialize;

/// Payload of one tree node.
///
/// Terminal nodes carry the matched token's name and literal value. For
/// non-terminal nodes `value` repeats `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseNode {
    pub name: String,
    pub value: String,
    pub is_terminal: bool,
}

impl ParseNode {
    pub fn terminal(token: &Token) -> Self {
        Self {
            name: token.name.clone(),
            value: token.value.clone(),
            is_terminal: true,
        }
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            name,
            is_terminal: false,
        }
    }
}

/// An owned n-ary tree. Children of an internal node are the derived symbols
/// of its chosen production, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTree {
    pub node: ParseNode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn leaf(token: &Token) -> Self {
        Self {
            node: ParseNode::terminal(token),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<ParseTree>) -> Self {
        Self {
            node: ParseNode::non_terminal(name),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Terminal nodes in left-to-right order.
    pub fn leaves(&self) -> Vec<&ParseNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ParseNode>) {
        if self.node.is_terminal {
            out.push(&self.node);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ParseTree::depth).max().unwrap_or(0)
    }
}
