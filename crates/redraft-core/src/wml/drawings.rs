//! Drawing identity and the before/after drawing audit.
//!
//! A drawing that points at an image part is identified by the image bytes,
//! so a relationship id renumbered on save does not count as a change. Other
//! drawings (shapes, charts, text boxes) are identified by their markup.

use super::document::WmlDocument;
use super::model::Story;
use crate::error::Result;
use crate::hash::fingerprint;
use crate::package::OoxmlPackage;
use crate::xml::builder::serialize_subtree;
use crate::xml::namespaces::{A, R, V, W};
use crate::xml::XmlDocument;
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingAudit {
    pub original: usize,
    pub edited: usize,
    /// Fingerprints present in the original but not in the edited document,
    /// once per missing copy.
    pub missing: Vec<String>,
    pub preserved: bool,
}

fn is_drawing(xml: &XmlDocument, node: NodeId) -> bool {
    xml.is_named(node, &W::drawing()) || xml.is_named(node, &W::pict()) || xml.is_named(node, &W::object())
}

/// Outermost drawing elements of a story, in document order.
fn story_drawings(story: &Story) -> Vec<NodeId> {
    let xml = &story.xml;
    let Some(root) = xml.root() else {
        return Vec::new();
    };

    xml.descendants(root)
        .filter(|&node| is_drawing(xml, node))
        .filter(|&node| !xml.ancestors(node).skip(1).any(|a| is_drawing(xml, a)))
        .collect()
}

fn image_reference(xml: &XmlDocument, drawing: NodeId) -> Option<String> {
    let blip = xml
        .descendants_by_name(drawing, A::blip())
        .find_map(|blip| xml.attribute(blip, &R::embed()));
    let imagedata = || {
        xml.descendants_by_name(drawing, V::imagedata())
            .find_map(|data| xml.attribute(data, &R::id()))
    };
    blip.or_else(imagedata).map(str::to_string)
}

fn drawing_identity(package: &OoxmlPackage, story: &Story, drawing: NodeId) -> Result<String> {
    if let Some(id) = image_reference(&story.xml, drawing) {
        match package.resolve_relationship(&story.part, &id)? {
            Some(path) => {
                if let Some(bytes) = package.get_part(&path) {
                    return Ok(format!("image:{}", fingerprint(bytes)));
                }
                warn!(%path, "image part missing from package");
            }
            None => warn!(%id, part = %story.part, "unresolved image relationship"),
        }
    }

    let markup = serialize_subtree(&story.xml, drawing)?;
    Ok(format!("xml:{}", fingerprint(markup.as_bytes())))
}

/// Fingerprint of every drawing in the body, headers and footers.
pub fn drawing_fingerprints(doc: &WmlDocument) -> Result<Vec<String>> {
    let mut fingerprints = Vec::new();
    for story in doc.load_stories()? {
        for drawing in story_drawings(&story) {
            fingerprints.push(drawing_identity(doc.package(), &story, drawing)?);
        }
    }
    Ok(fingerprints)
}

/// Checks that every drawing of `original` still exists in `edited`.
pub fn audit_drawings(original: &WmlDocument, edited: &WmlDocument) -> Result<DrawingAudit> {
    let before = drawing_fingerprints(original)?;
    let after = drawing_fingerprints(edited)?;

    let mut available: HashMap<&str, usize> = HashMap::new();
    for fingerprint in &after {
        *available.entry(fingerprint.as_str()).or_default() += 1;
    }

    let mut missing = Vec::new();
    for fingerprint in &before {
        match available.get_mut(fingerprint.as_str()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => missing.push(fingerprint.clone()),
        }
    }

    Ok(DrawingAudit {
        original: before.len(),
        edited: after.len(),
        preserved: missing.is_empty(),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wml::model::StoryKind;
    use crate::xml::parser::parse;

    #[test]
    fn nested_drawing_markup_counts_once() {
        let xml = parse(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
                <w:p><w:r><w:drawing><w:object/></w:drawing></w:r><w:r><w:pict/></w:r></w:p>
            </w:body></w:document>"#,
        )
        .unwrap();
        let story = Story::new("word/document.xml", StoryKind::Body, xml);

        assert_eq!(story_drawings(&story).len(), 2);
    }

    #[test]
    fn identical_documents_preserve_drawings() {
        let doc = WmlDocument::from_main_xml(
            br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
                <w:p><w:r><w:drawing><w:inline/></w:drawing></w:r></w:p>
            </w:body></w:document>"#,
        )
        .unwrap();

        let audit = audit_drawings(&doc, &doc).unwrap();
        assert_eq!(audit.original, 1);
        assert!(audit.preserved);
    }
}
