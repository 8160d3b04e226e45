use crate::error::{RedraftError, Result};
use crate::xml::XmlDocument;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use super::relationships::{
    parse_relationships, rels_path_for, relationship_types, resolve_target, Relationship,
};

const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// An OOXML zip package held entirely in memory. Entry order is kept so a
/// saved package lists its parts the way the source did (`[Content_Types].xml`
/// first).
#[derive(Clone, Default)]
pub struct OoxmlPackage {
    parts: HashMap<String, Vec<u8>>,
    order: Vec<String>,
}

impl OoxmlPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(bytes: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(bytes);
        let mut archive = ZipArchive::new(cursor)?;

        let mut package = Self::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            package.set_part(&name, content);
        }

        if package.parts.is_empty() {
            return Err(RedraftError::InvalidPackage {
                message: "archive contains no parts".to_string(),
            });
        }

        Ok(package)
    }

    pub fn save(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for path in &self.order {
            let Some(content) = self.parts.get(path) else {
                continue;
            };
            writer.start_file(path.as_str(), options)?;
            writer.write_all(content)?;
        }

        writer.finish()?;
        Ok(buffer.into_inner())
    }

    pub fn has_part(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    pub fn get_part(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(|v| v.as_slice())
    }

    pub fn get_xml_part(&self, path: &str) -> Result<XmlDocument> {
        let bytes = self.get_part(path).ok_or_else(|| RedraftError::MissingPart {
            part_path: path.to_string(),
        })?;
        crate::xml::parser::parse_part(bytes, path)
    }

    pub fn set_part(&mut self, path: &str, content: Vec<u8>) {
        if self.parts.insert(path.to_string(), content).is_none() {
            self.order.push(path.to_string());
        }
    }

    pub fn put_xml_part(&mut self, path: &str, doc: &XmlDocument) -> Result<()> {
        let bytes = crate::xml::builder::serialize_bytes(doc)?;
        self.set_part(path, bytes);
        Ok(())
    }

    pub fn part_names(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Relationships owned by `source_part` (`""` for the package itself).
    /// A part without a `.rels` companion has none.
    pub fn relationships(&self, source_part: &str) -> Result<Vec<Relationship>> {
        let rels_path = rels_path_for(source_part);
        match self.get_part(&rels_path) {
            Some(bytes) => parse_relationships(bytes, &rels_path),
            None => Ok(Vec::new()),
        }
    }

    /// Zip entry name a relationship of `source_part` points at, if the id
    /// exists and is internal.
    pub fn resolve_relationship(&self, source_part: &str, id: &str) -> Result<Option<String>> {
        let target = self
            .relationships(source_part)?
            .into_iter()
            .find(|rel| rel.id == id && !rel.is_external())
            .map(|rel| resolve_target(source_part, &rel.target));
        Ok(target)
    }

    /// Entry names of every internal relationship of `rel_type` owned by
    /// `source_part`, in `.rels` order.
    pub fn related_parts(&self, source_part: &str, rel_type: &str) -> Result<Vec<String>> {
        Ok(self
            .relationships(source_part)?
            .into_iter()
            .filter(|rel| rel.rel_type == rel_type && !rel.is_external())
            .map(|rel| resolve_target(source_part, &rel.target))
            .collect())
    }

    /// The officeDocument part named by `_rels/.rels`.
    pub fn main_part_path(&self) -> Result<String> {
        let main = self
            .related_parts("", relationship_types::OFFICE_DOCUMENT)?
            .into_iter()
            .next()
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());
        Ok(main)
    }
}
