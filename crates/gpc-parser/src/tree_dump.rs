/// Parse tree dumping for debugging and CLI output
///
/// Pre-order, one node per line as `value (name)`. Each level of depth adds
/// one `|` to the line prefix.

use crate::tree::ParseTree;
use std::fmt::{self, Write as FmtWrite};

/// Dump a parse tree as depth-marked text
pub fn dump_tree(tree: &ParseTree) -> String {
    let mut out = String::new();
    write_tree(&mut out, tree, "").unwrap();
    out
}

fn write_tree(out: &mut impl FmtWrite, tree: &ParseTree, prefix: &str) -> fmt::Result {
    writeln!(out, "{}{} ({})", prefix, tree.node.value, tree.node.name)?;
    let child_prefix = format!("{}|", prefix);
    for child in &tree.children {
        write_tree(out, child, &child_prefix)?;
    }
    Ok(())
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, "")
    }
}
