//! Run-level text access.
//!
//! A run mixes text-bearing children (`w:t`, `w:tab`, text-wrapping breaks)
//! with everything else Word hangs off it: properties, drawings, field
//! characters, page breaks. Reads concatenate the text-bearing children;
//! writes swap only those children and leave the rest where they were.

use crate::xml::namespaces::{W, XML};
use crate::xml::{XAttribute, XmlDocument, XmlNodeData};
use indextree::NodeId;

/// Text contributed by a single run child, `None` for non-text content.
fn child_text(doc: &XmlDocument, child: NodeId) -> Option<String> {
    let name = doc.get(child)?.name()?;
    if name.namespace() != Some(W::NS) {
        return None;
    }

    match name.local_name() {
        "t" => Some(doc.inner_text(child)),
        "tab" | "ptab" => Some("\t".to_string()),
        "cr" => Some("\n".to_string()),
        "noBreakHyphen" => Some("-".to_string()),
        "br" => match doc.attribute(child, &W::type_()) {
            None | Some("textWrapping") => Some("\n".to_string()),
            // page and column breaks are layout, not text
            Some(_) => None,
        },
        _ => None,
    }
}

pub fn is_text_bearing(doc: &XmlDocument, child: NodeId) -> bool {
    child_text(doc, child).is_some()
}

pub fn run_text(doc: &XmlDocument, run: NodeId) -> String {
    doc.children(run)
        .filter_map(|child| child_text(doc, child))
        .collect()
}

/// True when the run carries a drawing, VML picture or embedded object.
pub fn has_drawing(doc: &XmlDocument, run: NodeId) -> bool {
    let (drawing, pict, object) = (W::drawing(), W::pict(), W::object());
    doc.descendants(run)
        .skip(1)
        .any(|node| doc.is_named(node, &drawing) || doc.is_named(node, &pict) || doc.is_named(node, &object))
}

enum Piece {
    Text(String),
    Tab,
    Break,
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Splits text into `w:t`/`w:tab`/`w:br` pieces. `\r\n`, `\r` and `\n` each
/// make one break. Control characters XML 1.0 cannot carry become U+FFFD.
fn pieces(text: &str) -> Vec<Piece> {
    let mut out = Vec::new();
    let mut buffer = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let piece = match c {
            '\t' => Piece::Tab,
            '\r' => {
                chars.next_if_eq(&'\n');
                Piece::Break
            }
            '\n' => Piece::Break,
            c if is_xml_char(c) => {
                buffer.push(c);
                continue;
            }
            _ => {
                buffer.push('\u{FFFD}');
                continue;
            }
        };
        if !buffer.is_empty() {
            out.push(Piece::Text(std::mem::take(&mut buffer)));
        }
        out.push(piece);
    }
    if !buffer.is_empty() {
        out.push(Piece::Text(buffer));
    }

    out
}

/// Replaces the run's text with `text`. New text children take the position
/// of the first old one; a run without text gets them appended.
pub fn set_run_text(doc: &mut XmlDocument, run: NodeId, text: &str) {
    let old: Vec<NodeId> = doc
        .children(run)
        .filter(|&child| is_text_bearing(doc, child))
        .collect();
    let anchor = old.first().copied();

    for piece in pieces(text) {
        let (data, content) = match piece {
            Piece::Text(content) => {
                let mut attributes = Vec::new();
                if content.trim() != content {
                    attributes.push(XAttribute::new(XML::space(), "preserve"));
                }
                (XmlNodeData::element_with_attrs(W::t(), attributes), Some(content))
            }
            Piece::Tab => (XmlNodeData::element(W::tab()), None),
            Piece::Break => (XmlNodeData::element(W::br()), None),
        };

        let node = match anchor {
            Some(anchor) => doc.add_before(anchor, data),
            None => doc.add_child(run, data),
        };
        if let Some(content) = content {
            doc.add_child(node, XmlNodeData::text(&content));
        }
    }

    for child in old {
        doc.remove(child);
    }
}
