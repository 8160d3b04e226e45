use super::arena::XmlDocument;
use super::namespaces::XMLNS;
use super::node::XmlNodeData;
use super::xname::{XAttribute, XName};
use crate::error::{RedraftError, Result};

pub fn parse(xml: &str) -> Result<XmlDocument> {
    parse_bytes(xml.as_bytes())
}

/// Parses a part into an owned tree. `location` names the part in errors.
pub fn parse_part(bytes: &[u8], location: &str) -> Result<XmlDocument> {
    let text = std::str::from_utf8(bytes).map_err(|e| RedraftError::XmlParse {
        message: e.to_string(),
        location: location.to_string(),
    })?;
    // Parts written by Word may start with a byte order mark.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let doc = roxmltree::Document::parse_with_options(
        text,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .map_err(|e| RedraftError::XmlParse {
        message: e.to_string(),
        location: format!("{} line {}", location, e.pos().row),
    })?;

    let mut xml_doc = XmlDocument::new();
    build_tree(doc.root_element(), &mut xml_doc, None);
    Ok(xml_doc)
}

pub fn parse_bytes(bytes: &[u8]) -> Result<XmlDocument> {
    parse_part(bytes, "input")
}

fn build_tree(
    node: roxmltree::Node,
    doc: &mut XmlDocument,
    parent: Option<indextree::NodeId>,
) {
    let node_data = match node.node_type() {
        roxmltree::NodeType::Element => {
            let name = XName::owned(
                node.tag_name().namespace().unwrap_or(""),
                node.tag_name().name(),
            );

            let mut attributes: Vec<XAttribute> = node
                .attributes()
                .map(|attr| {
                    XAttribute::new(
                        XName::owned(attr.namespace().unwrap_or(""), attr.name()),
                        attr.value(),
                    )
                })
                .collect();

            // roxmltree reports every namespace in scope; keep only the ones
            // this element declares so the writer does not repeat them.
            let inherited: Vec<(Option<&str>, &str)> = node
                .parent_element()
                .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
                .unwrap_or_default();

            for ns in node.namespaces() {
                if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
                    continue;
                }
                let decl = match ns.name() {
                    Some(prefix) => XName::owned(XMLNS::NS, prefix),
                    None => XName::local("xmlns"),
                };
                attributes.push(XAttribute::new(decl, ns.uri()));
            }

            XmlNodeData::Element { name, attributes }
        }
        roxmltree::NodeType::Text => match node.text() {
            Some(text) => XmlNodeData::Text(text.to_string()),
            None => return,
        },
        roxmltree::NodeType::Comment => match node.text() {
            Some(text) => XmlNodeData::Comment(text.to_string()),
            None => return,
        },
        roxmltree::NodeType::PI => match node.pi() {
            Some(pi) => XmlNodeData::ProcessingInstruction {
                target: pi.target.to_string(),
                data: pi.value.map(|s| s.to_string()).unwrap_or_default(),
            },
            None => return,
        },
        _ => return,
    };

    let new_id = match parent {
        Some(parent_id) => doc.add_child(parent_id, node_data),
        None => doc.add_root(node_data),
    };

    for child in node.children() {
        build_tree(child, doc, Some(new_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespaces::W;

    #[test]
    fn parse_simple_xml() {
        let doc = parse(r#"<root><child attr="value">text</child></root>"#).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(doc.inner_text(root), "text");
    }

    #[test]
    fn parse_resolves_word_namespace() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>
        </w:document>"#;

        let doc = parse(xml).unwrap();
        let root = doc.root().unwrap();
        assert!(doc.is_named(root, &W::document()));
        assert_eq!(doc.descendants_by_name(root, W::t()).count(), 1);
    }

    #[test]
    fn namespace_declarations_stay_on_declaring_element() {
        let xml = r#"<a:root xmlns:a="urn:a"><a:child/></a:root>"#;
        let doc = parse(xml).unwrap();
        let root = doc.root().unwrap();
        let child = doc.children(root).next().unwrap();

        let root_attrs = doc.get(root).unwrap().attributes().unwrap();
        assert_eq!(root_attrs.len(), 1);
        assert!(doc.get(child).unwrap().attributes().unwrap().is_empty());
    }

    #[test]
    fn parse_preserves_attribute_order() {
        let doc = parse(r#"<root a="1" b="2" c="3"/>"#).unwrap();
        let attrs = doc.get(doc.root().unwrap()).unwrap().attributes().unwrap();
        let names: Vec<_> = attrs.iter().map(|a| a.name.local_name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn malformed_xml_reports_location() {
        let err = parse_part(b"<root><open></root>", "word/document.xml").unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }
}
