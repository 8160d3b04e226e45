use crate::error::{RedraftError, Result};
use crate::xml::namespaces::PKG_REL;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    #[serde(default)]
    pub target_mode: TargetMode,
}

impl Relationship {
    pub fn new(id: &str, rel_type: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: TargetMode::Internal,
        }
    }

    pub fn is_external(&self) -> bool {
        self.target_mode == TargetMode::External
    }
}

pub mod relationship_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const HEADER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    pub const CHART: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}

/// Parses a `.rels` part. `location` names the part in errors.
pub fn parse_relationships(bytes: &[u8], location: &str) -> Result<Vec<Relationship>> {
    let text = std::str::from_utf8(bytes).map_err(|e| RedraftError::XmlParse {
        message: e.to_string(),
        location: location.to_string(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc = roxmltree::Document::parse(text).map_err(|e| RedraftError::XmlParse {
        message: e.to_string(),
        location: format!("{} line {}", location, e.pos().row),
    })?;

    let rel_name = PKG_REL::Relationship();
    let mut relationships = Vec::new();

    for node in doc.root_element().children().filter(|n| n.is_element()) {
        if node.tag_name().name() != rel_name.local_name()
            || node.tag_name().namespace() != Some(PKG_REL::NS)
        {
            continue;
        }

        let attr = |name: &str| node.attribute(name).map(str::to_string);
        let (Some(id), Some(rel_type), Some(target)) = (attr("Id"), attr("Type"), attr("Target")) else {
            return Err(RedraftError::InvalidRelationship {
                message: format!("{}: relationship without Id, Type or Target", location),
            });
        };

        let target_mode = match node.attribute("TargetMode") {
            Some("External") => TargetMode::External,
            _ => TargetMode::Internal,
        };

        relationships.push(Relationship {
            id,
            rel_type,
            target,
            target_mode,
        });
    }

    Ok(relationships)
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`; the package itself
/// (empty source) -> `_rels/.rels`.
pub fn rels_path_for(source_part: &str) -> String {
    match source_part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source_part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", source_part),
    }
}

/// Resolves a relationship target against the part that owns the
/// relationship, yielding a zip entry name.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn parses_internal_and_external_relationships() {
        let rels = parse_relationships(DOCUMENT_RELS.as_bytes(), "word/_rels/document.xml.rels").unwrap();

        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0], Relationship::new("rId1", relationship_types::STYLES, "styles.xml"));
        assert!(rels[1].is_external());
    }

    #[test]
    fn relationship_without_target_is_rejected() {
        let xml = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="x"/></Relationships>"#;
        let err = parse_relationships(xml.as_bytes(), "rels").unwrap_err();
        assert!(matches!(err, RedraftError::InvalidRelationship { .. }));
    }

    #[test]
    fn rels_path_sits_next_to_source() {
        assert_eq!(rels_path_for("word/document.xml"), "word/_rels/document.xml.rels");
        assert_eq!(rels_path_for(""), "_rels/.rels");
    }

    #[test]
    fn targets_resolve_relative_to_source_directory() {
        assert_eq!(resolve_target("word/document.xml", "header1.xml"), "word/header1.xml");
        assert_eq!(resolve_target("word/document.xml", "charts/chart1.xml"), "word/charts/chart1.xml");
        assert_eq!(resolve_target("word/charts/chart1.xml", "../embeddings/a.xlsx"), "word/embeddings/a.xlsx");
        assert_eq!(resolve_target("", "word/document.xml"), "word/document.xml");
        assert_eq!(resolve_target("word/document.xml", "/word/styles.xml"), "word/styles.xml");
    }
}
