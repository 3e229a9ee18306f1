//! Line-record format of the stored tree
//!
//! Pre-order: a node's text, then its yes subtree, then its no subtree.
//! An absent child is written as the record `NULL`. A leaf therefore looks
//! like:
//!
//! ```text
//! Is it a human?
//! NULL
//! NULL
//! ```

use std::io::{self, BufRead, Write};

use crate::domain::{Node, ParseError};

/// Record marking an absent child.
pub const NULL_RECORD: &str = "NULL";

/// Deepest leaf accepted by [`restore`], in questions above it.
pub const MAX_DEPTH: usize = 1000;

/// Serialize a tree into its record form.
pub fn persist(root: &Node) -> String {
    let mut out = String::new();
    push_records(Some(root), &mut out);
    out
}

fn push_records(node: Option<&Node>, out: &mut String) {
    match node {
        None => {
            out.push_str(NULL_RECORD);
            out.push('\n');
        }
        Some(node) => {
            out.push_str(node.text());
            out.push('\n');
            push_records(node.yes_child(), out);
            push_records(node.no_child(), out);
        }
    }
}

/// Write the record form of a tree to `writer`.
pub fn write_to<W: Write>(root: &Node, writer: &mut W) -> io::Result<()> {
    writer.write_all(persist(root).as_bytes())?;
    writer.flush()
}

/// Parse a tree from its record form.
///
/// Returns `Ok(None)` when the root record is `NULL`.
pub fn restore(input: &str) -> Result<Option<Node>, ParseError> {
    read_from(input.as_bytes())
}

/// Parse a tree from a reader.
///
/// Fails on truncated data, a node with exactly one branch, nesting beyond
/// [`MAX_DEPTH`], read errors and non-empty records after the tree.
pub fn read_from<R: BufRead>(reader: R) -> Result<Option<Node>, ParseError> {
    let mut records = Records::new(reader);
    let root = read_subtree(&mut records, 0)?;

    while let Some(record) = records.next_record()? {
        if !record.trim().is_empty() {
            return Err(ParseError::TrailingRecords {
                line: records.line,
            });
        }
    }
    Ok(root)
}

fn read_subtree<R: BufRead>(
    records: &mut Records<R>,
    depth: usize,
) -> Result<Option<Node>, ParseError> {
    let text = records.next_record()?.ok_or(ParseError::UnexpectedEof {
        line: records.line,
    })?;
    if text == NULL_RECORD {
        return Ok(None);
    }
    let line = records.line;
    // `depth` counts questions above this node, as `Node::depth` does
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep {
            line,
            limit: MAX_DEPTH,
        });
    }

    let yes = read_subtree(records, depth + 1)?;
    let no = read_subtree(records, depth + 1)?;
    match (yes, no) {
        (None, None) => Ok(Some(Node::new(text))),
        (Some(yes), Some(no)) => Ok(Some(Node::question(text, yes, no))),
        _ => Err(ParseError::UnbalancedNode { line }),
    }
}

/// Line reader that tracks the current line number.
struct Records<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    fn next_record(&mut self) -> Result<Option<String>, ParseError> {
        let mut buf = String::new();
        let n = self
            .reader
            .read_line(&mut buf)
            .map_err(|source| ParseError::Read {
                line: self.line + 1,
                source,
            })?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bark_tree() -> Node {
        Node::question("Does it bark?", Node::guess("dog"), Node::guess("human"))
    }

    #[test]
    fn given_leaf_when_persisting_then_writes_text_and_two_sentinels() {
        assert_eq!(persist(&Node::default()), "Is it a human?\nNULL\nNULL\n");
    }

    #[test]
    fn given_tree_when_persisting_then_writes_pre_order() {
        let expected = "Does it bark?\nIs it a dog?\nNULL\nNULL\nIs it a human?\nNULL\nNULL\n";
        assert_eq!(persist(&bark_tree()), expected);
    }

    #[test]
    fn given_persisted_tree_when_restoring_then_identical() {
        let restored = restore(&persist(&bark_tree())).unwrap();
        assert_eq!(restored, Some(bark_tree()));
    }

    #[test]
    fn given_null_root_when_restoring_then_absent() {
        assert_eq!(restore("NULL\n").unwrap(), None);
    }

    #[test]
    fn given_crlf_records_when_restoring_then_strips_carriage_returns() {
        let input = "Does it bark?\r\nIs it a dog?\r\nNULL\r\nNULL\r\nIs it a human?\r\nNULL\r\nNULL\r\n";
        assert_eq!(restore(input).unwrap(), Some(bark_tree()));
    }

    #[test]
    fn given_missing_final_newline_when_restoring_then_accepts() {
        assert_eq!(
            restore("Is it a human?\nNULL\nNULL").unwrap(),
            Some(Node::default())
        );
    }

    #[test]
    fn given_trailing_blank_lines_when_restoring_then_ignores_them() {
        assert_eq!(
            restore("Is it a human?\nNULL\nNULL\n\n\n").unwrap(),
            Some(Node::default())
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::text_only("Is it a human?\n")]
    #[case::truncated_mid_tree("Does it bark?\nIs it a dog?\nNULL\nNULL\nIs it a human?\nNULL\n")]
    fn given_truncated_data_when_restoring_then_unexpected_eof(#[case] input: &str) {
        assert!(matches!(
            restore(input),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn given_single_branch_node_when_restoring_then_unbalanced() {
        let input = "Does it bark?\nIs it a dog?\nNULL\nNULL\nNULL\n";
        assert!(matches!(
            restore(input),
            Err(ParseError::UnbalancedNode { line: 1 })
        ));
    }

    #[test]
    fn given_records_after_tree_when_restoring_then_trailing_error() {
        let input = "Is it a human?\nNULL\nNULL\nIs it a dog?\n";
        assert!(matches!(
            restore(input),
            Err(ParseError::TrailingRecords { line: 4 })
        ));
    }

    #[test]
    fn given_excessive_nesting_when_restoring_then_too_deep() {
        let input = "Q\n".repeat(MAX_DEPTH + 2);
        assert!(matches!(
            restore(&input),
            Err(ParseError::TooDeep { line, .. }) if line == MAX_DEPTH + 2
        ));
    }

    #[test]
    fn given_writer_when_writing_then_matches_persist() {
        let mut buf = Vec::new();
        write_to(&bark_tree(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), persist(&bark_tree()));
    }
}
