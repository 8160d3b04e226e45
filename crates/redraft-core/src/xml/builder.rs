use super::arena::XmlDocument;
use super::namespaces::XMLNS;
use super::node::XmlNodeData;
use super::xname::{XAttribute, XName};
use crate::error::{RedraftError, Result};
use indextree::NodeId;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::{HashMap, HashSet};
use std::io::Cursor;

/// namespace uri -> prefix ("" for the default namespace)
type NamespaceMap = HashMap<String, String>;

pub fn serialize(doc: &XmlDocument) -> Result<String> {
    let bytes = serialize_bytes(doc)?;
    String::from_utf8(bytes).map_err(|e| RedraftError::XmlWrite(e.to_string()))
}

pub fn serialize_bytes(doc: &XmlDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(write_error)?;

    if let Some(root_id) = doc.root() {
        write_node(doc, root_id, &mut writer, &NamespaceMap::new())?;
    }

    Ok(writer.into_inner().into_inner())
}

/// Serializes `node_id` and its subtree without an XML declaration. Namespace
/// declarations made by ancestors are copied onto the subtree root so the
/// fragment stands on its own.
pub fn serialize_subtree(doc: &XmlDocument, node_id: NodeId) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let Some(node_data) = doc.get(node_id) else {
        return Ok(String::new());
    };

    match node_data {
        XmlNodeData::Element { name, attributes } => {
            let mut merged_attrs = attributes.clone();
            let mut declared: HashSet<XName> = merged_attrs
                .iter()
                .filter(|attr| is_xmlns_attr(attr))
                .map(|attr| attr.name.clone())
                .collect();
            merged_attrs.extend(collect_ancestor_namespace_attrs(doc, node_id, &mut declared));

            write_element(doc, node_id, name, &merged_attrs, &mut writer, &NamespaceMap::new())?;
        }
        _ => write_node(doc, node_id, &mut writer, &NamespaceMap::new())?,
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| RedraftError::XmlWrite(e.to_string()))
}

fn write_error(e: impl std::fmt::Display) -> RedraftError {
    RedraftError::XmlWrite(e.to_string())
}

fn is_xmlns_attr(attr: &XAttribute) -> bool {
    match attr.name.namespace() {
        None => attr.name.local_name() == "xmlns",
        Some(ns) => ns == XMLNS::NS,
    }
}

fn collect_ancestor_namespace_attrs(
    doc: &XmlDocument,
    node_id: NodeId,
    declared: &mut HashSet<XName>,
) -> Vec<XAttribute> {
    let mut collected = Vec::new();

    // ancestors() starts with the node itself
    for ancestor_id in doc.ancestors(node_id).skip(1) {
        let Some(attrs) = doc.get(ancestor_id).and_then(|data| data.attributes()) else {
            continue;
        };
        for attr in attrs {
            if is_xmlns_attr(attr) && declared.insert(attr.name.clone()) {
                collected.push(attr.clone());
            }
        }
    }

    collected
}

fn extend_namespace_map(namespace_map: &mut NamespaceMap, attributes: &[XAttribute]) {
    for attr in attributes {
        match attr.name.namespace() {
            None if attr.name.local_name() == "xmlns" => {
                namespace_map.insert(attr.value.clone(), String::new());
            }
            Some(XMLNS::NS) => {
                namespace_map.insert(attr.value.clone(), attr.name.local_name().to_string());
            }
            _ => {}
        }
    }
}

fn qualified_name(name: &XName, namespace_map: &NamespaceMap, is_attribute: bool) -> String {
    let Some(ns) = name.namespace() else {
        return name.local_name().to_string();
    };

    let prefix = if ns == XMLNS::NS {
        "xmlns"
    } else {
        match namespace_map.get(ns) {
            // Unprefixed attributes are never in the default namespace.
            Some(prefix) if !(is_attribute && prefix.is_empty()) => prefix.as_str(),
            _ => well_known_prefix(ns),
        }
    };

    if prefix.is_empty() {
        name.local_name().to_string()
    } else {
        format!("{}:{}", prefix, name.local_name())
    }
}

fn write_node<W: std::io::Write>(
    doc: &XmlDocument,
    node_id: NodeId,
    writer: &mut Writer<W>,
    namespace_map: &NamespaceMap,
) -> Result<()> {
    let Some(node_data) = doc.get(node_id) else {
        return Ok(());
    };

    match node_data {
        XmlNodeData::Element { name, attributes } => {
            write_element(doc, node_id, name, attributes, writer, namespace_map)?;
        }
        XmlNodeData::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text))).map_err(write_error)?;
        }
        XmlNodeData::CData(text) => {
            writer.write_event(Event::CData(BytesCData::new(text))).map_err(write_error)?;
        }
        XmlNodeData::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::new(text))).map_err(write_error)?;
        }
        XmlNodeData::ProcessingInstruction { target, data } => {
            let content = if data.is_empty() {
                target.clone()
            } else {
                format!("{} {}", target, data)
            };
            writer.write_event(Event::PI(BytesPI::new(&content))).map_err(write_error)?;
        }
    }

    Ok(())
}

fn write_element<W: std::io::Write>(
    doc: &XmlDocument,
    node_id: NodeId,
    name: &XName,
    attributes: &[XAttribute],
    writer: &mut Writer<W>,
    namespace_map: &NamespaceMap,
) -> Result<()> {
    let mut scoped_map = namespace_map.clone();
    extend_namespace_map(&mut scoped_map, attributes);

    let tag_name = qualified_name(name, &scoped_map, false);
    let mut elem = BytesStart::new(tag_name.as_str());
    for attr in attributes {
        let attr_name = qualified_name(&attr.name, &scoped_map, true);
        elem.push_attribute((attr_name.as_str(), attr.value.as_str()));
    }

    let children: Vec<_> = doc.children(node_id).collect();
    if children.is_empty() {
        writer.write_event(Event::Empty(elem)).map_err(write_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(elem)).map_err(write_error)?;
    for child_id in children {
        write_node(doc, child_id, writer, &scoped_map)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag_name.as_str())))
        .map_err(write_error)?;

    Ok(())
}

fn well_known_prefix(namespace: &str) -> &'static str {
    match namespace {
        "http://schemas.openxmlformats.org/wordprocessingml/2006/main" => "w",
        "http://schemas.microsoft.com/office/word/2010/wordml" => "w14",
        "http://schemas.openxmlformats.org/drawingml/2006/main" => "a",
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" => "wp",
        "http://schemas.openxmlformats.org/drawingml/2006/picture" => "pic",
        "http://schemas.openxmlformats.org/drawingml/2006/chart" => "c",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships" => "r",
        "http://schemas.openxmlformats.org/markup-compatibility/2006" => "mc",
        "urn:schemas-microsoft-com:vml" => "v",
        "http://www.w3.org/XML/1998/namespace" => "xml",
        _ => "ns",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;

    #[test]
    fn serialize_simple_document() {
        let mut doc = XmlDocument::new();
        let root = doc.add_root(XmlNodeData::element(XName::local("root")));
        doc.add_child(root, XmlNodeData::text("content"));

        let xml = serialize(&doc).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<root>content</root>"));
    }

    #[test]
    fn serialize_empty_element() {
        let mut doc = XmlDocument::new();
        doc.add_root(XmlNodeData::element(XName::local("empty")));

        let xml = serialize(&doc).unwrap();
        assert!(xml.contains("<empty/>"));
    }

    #[test]
    fn text_is_escaped() {
        let mut doc = XmlDocument::new();
        let root = doc.add_root(XmlNodeData::element(XName::local("t")));
        doc.add_child(root, XmlNodeData::text("a < b & c"));

        let xml = serialize(&doc).unwrap();
        assert!(xml.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn parsed_prefixes_survive_round_trip() {
        let source = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t xml:space="preserve"> Hi </w:t></w:r></w:p></w:body></w:document>"#;
        let doc = parse(source).unwrap();
        let xml = serialize(&doc).unwrap();

        assert!(xml.contains(r#"<w:t xml:space="preserve"> Hi </w:t>"#));
        assert!(xml.contains(r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#));
    }

    #[test]
    fn subtree_carries_inherited_declarations() {
        let doc = parse(r#"<a:root xmlns:a="urn:a"><a:leaf/></a:root>"#).unwrap();
        let leaf = doc.children(doc.root().unwrap()).next().unwrap();

        let fragment = serialize_subtree(&doc, leaf).unwrap();
        assert_eq!(fragment, r#"<a:leaf xmlns:a="urn:a"/>"#);
    }
}
