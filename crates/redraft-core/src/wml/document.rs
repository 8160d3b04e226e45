use super::model::{Story, StoryKind};
use super::settings::OutputSettings;
use crate::error::{RedraftError, Result};
use crate::package::{relationship_types, OoxmlPackage};
use crate::xml::namespaces::{C, R, W};
use crate::xml::XmlDocument;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// A Word document held in memory. Editing operations never touch the
/// package they were given; they return a new `WmlDocument`.
#[derive(Clone)]
pub struct WmlDocument {
    package: OoxmlPackage,
    main_part: String,
}

impl WmlDocument {
    /// Create a minimal WML document package from main XML content (useful for testing)
    pub fn from_main_xml(main_xml: &[u8]) -> Result<Self> {
        let mut package = OoxmlPackage::new();
        package.set_part("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec());
        package.set_part("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec());
        package.set_part("word/document.xml", main_xml.to_vec());
        Self::from_package(package)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_package(OoxmlPackage::open(bytes)?)
    }

    pub fn from_package(package: OoxmlPackage) -> Result<Self> {
        let main_part = package.main_part_path()?;
        if !package.has_part(&main_part) {
            return Err(RedraftError::MissingPart {
                part_path: main_part,
            });
        }
        Ok(Self { package, main_part })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening document");
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.save()
    }

    /// Writes the document under a fresh name in the configured output
    /// directory and returns the path.
    pub fn save_to(&self, settings: &OutputSettings) -> Result<PathBuf> {
        std::fs::create_dir_all(settings.output_dir())?;
        let path = settings.fresh_path();
        std::fs::write(&path, self.to_bytes()?)?;
        debug!(path = %path.display(), "saved document");
        Ok(path)
    }

    pub fn package(&self) -> &OoxmlPackage {
        &self.package
    }

    pub fn package_mut(&mut self) -> &mut OoxmlPackage {
        &mut self.package
    }

    pub fn main_part_path(&self) -> &str {
        &self.main_part
    }

    pub fn main_document(&self) -> Result<XmlDocument> {
        self.package.get_xml_part(&self.main_part)
    }

    pub fn styles_part_path(&self) -> Result<Option<String>> {
        let related = self
            .package
            .related_parts(&self.main_part, relationship_types::STYLES)?
            .into_iter()
            .find(|path| self.package.has_part(path));
        Ok(related.or_else(|| {
            self.package
                .has_part("word/styles.xml")
                .then(|| "word/styles.xml".to_string())
        }))
    }

    pub fn styles(&self) -> Result<Option<XmlDocument>> {
        match self.styles_part_path()? {
            Some(path) => Ok(Some(self.package.get_xml_part(&path)?)),
            None => Ok(None),
        }
    }

    /// Header and footer parts in section order: for every section its
    /// headers, then its footers (default, first, even). A part shared by
    /// several sections is listed once.
    pub fn header_footer_parts(&self, main: &XmlDocument) -> Result<Vec<(StoryKind, String)>> {
        let Some(root) = main.root() else {
            return Ok(Vec::new());
        };

        let rels = self.package.relationships(&self.main_part)?;
        let mut seen = HashSet::new();
        let mut parts = Vec::new();

        for sect_pr in main.descendants_by_name(root, W::sectPr()) {
            for (kind, reference) in [
                (StoryKind::Header, W::headerReference()),
                (StoryKind::Footer, W::footerReference()),
            ] {
                let mut refs: Vec<_> = main.elements_by_name(sect_pr, reference).collect();
                refs.sort_by_key(|&node| reference_rank(main.attribute(node, &W::type_())));

                for node in refs {
                    let Some(id) = main.attribute(node, &R::id()) else {
                        continue;
                    };
                    let Some(rel) = rels.iter().find(|rel| rel.id == id && !rel.is_external()) else {
                        warn!(id, part = %self.main_part, "unresolved header/footer relationship");
                        continue;
                    };
                    let path = crate::package::relationships::resolve_target(&self.main_part, &rel.target);
                    if !self.package.has_part(&path) {
                        warn!(%path, "header/footer part missing from package");
                        continue;
                    }
                    if seen.insert(path.clone()) {
                        parts.push((kind, path));
                    }
                }
            }
        }

        Ok(parts)
    }

    /// Chart parts referenced from the body, in document order.
    pub fn chart_parts(&self, main: &XmlDocument) -> Result<Vec<String>> {
        let Some(root) = main.root() else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut parts = Vec::new();

        for chart in main.descendants_by_name(root, C::chart()) {
            let Some(id) = main.attribute(chart, &R::id()) else {
                continue;
            };
            match self.package.resolve_relationship(&self.main_part, id)? {
                Some(path) if self.package.has_part(&path) => {
                    if seen.insert(path.clone()) {
                        parts.push(path);
                    }
                }
                _ => warn!(id, "unresolved chart relationship"),
            }
        }

        Ok(parts)
    }

    /// Parses the body and every header and footer into editable stories,
    /// body first.
    pub fn load_stories(&self) -> Result<Vec<Story>> {
        let main = self.main_document()?;
        let mut stories = Vec::new();

        for (kind, path) in self.header_footer_parts(&main)? {
            let xml = self.package.get_xml_part(&path)?;
            stories.push(Story::new(path, kind, xml));
        }
        stories.insert(0, Story::new(self.main_part.clone(), StoryKind::Body, main));

        Ok(stories)
    }

    /// A copy of this document with the given stories written back.
    pub fn with_stories(&self, stories: &[Story]) -> Result<Self> {
        let mut edited = self.clone();
        for story in stories {
            edited.package.put_xml_part(&story.part, &story.xml)?;
        }
        Ok(edited)
    }
}

fn reference_rank(kind: Option<&str>) -> u8 {
    match kind {
        Some("default") | None => 0,
        Some("first") => 1,
        Some("even") => 2,
        Some(_) => 3,
    }
}
