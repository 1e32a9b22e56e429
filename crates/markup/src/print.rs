//! Read-only visitors over a finished document: an indented outline for
//! humans and a serializer back to parseable markup.
//!
//! Both walk the tree with an explicit stack, so deeply nested documents
//! print without touching the call stack. Neither output is a stable
//! serialization contract; `to_markup` only promises that re-parsing its
//! output yields an isomorphic tree.

use std::fmt::{self, Write};

use crate::dom::{Document, NodeId, NodeKind, is_void_tag};

/// Write one line per node, indented two spaces per nesting depth:
/// `<tag attr="value">` for elements, `TEXT: "..."` for text nodes. The
/// synthetic root is not printed; its children start at depth zero.
pub fn write_outline<W: Write>(out: &mut W, doc: &Document) -> fmt::Result {
    let mut stack: Vec<(NodeId, usize)> = doc
        .children(doc.root())
        .iter()
        .rev()
        .map(|&id| (id, 0))
        .collect();

    while let Some((id, depth)) = stack.pop() {
        for _ in 0..depth {
            out.write_str("  ")?;
        }
        match doc.kind(id) {
            NodeKind::Element => {
                write!(out, "<{}", doc.tag_name(id).unwrap_or_default())?;
                for (name, value) in doc.attributes(id) {
                    write!(out, " {name}=\"{value}\"")?;
                }
                out.write_str(">\n")?;
                for &child in doc.children(id).iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
            NodeKind::Text => {
                writeln!(out, "TEXT: {:?}", doc.text(id).unwrap_or_default())?;
            }
        }
    }
    Ok(())
}

/// `write_outline` into a fresh `String`.
pub fn outline(doc: &Document) -> String {
    let mut out = String::new();
    write_outline(&mut out, doc).expect("writing to a String cannot fail");
    out
}

/// Serialize a document back to markup text.
///
/// Void elements are written without a closing tag (they are childless by
/// construction). Attribute values are double-quoted unless the value itself
/// contains `"`, then single-quoted; a parsed value can never contain both
/// quote kinds, because a quoted scan excludes its own delimiter.
pub fn to_markup(doc: &Document) -> String {
    enum Step {
        Enter(NodeId),
        Leave(NodeId),
    }

    let mut out = String::new();
    let mut stack: Vec<Step> = doc
        .children(doc.root())
        .iter()
        .rev()
        .map(|&id| Step::Enter(id))
        .collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => match doc.kind(id) {
                NodeKind::Text => out.push_str(doc.text(id).unwrap_or_default()),
                NodeKind::Element => {
                    let tag = doc.tag_name(id).unwrap_or_default();
                    out.push('<');
                    out.push_str(tag);
                    for (name, value) in doc.attributes(id) {
                        let quote = if value.contains('"') { '\'' } else { '"' };
                        out.push(' ');
                        out.push_str(name);
                        out.push('=');
                        out.push(quote);
                        out.push_str(value);
                        out.push(quote);
                    }
                    out.push('>');
                    if !is_void_tag(tag) {
                        stack.push(Step::Leave(id));
                        for &child in doc.children(id).iter().rev() {
                            stack.push(Step::Enter(child));
                        }
                    }
                }
            },
            Step::Leave(id) => {
                out.push_str("</");
                out.push_str(doc.tag_name(id).unwrap_or_default());
                out.push('>');
            }
        }
    }
    out
}
