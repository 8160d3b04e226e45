//! Typed view over a parsed Word part: stories, paragraphs and runs.
//!
//! Node ids are only meaningful inside the `XmlDocument` they came from, so
//! every story owns its tree and paragraphs are read from it on demand.

use super::text::{has_drawing, run_text};
use crate::util::descendants_trimmed;
use crate::xml::namespaces::W;
use crate::xml::XmlDocument;
use indextree::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryKind {
    Body,
    Header,
    Footer,
}

/// One editable part of the document: the main body, a header or a footer.
#[derive(Clone)]
pub struct Story {
    pub part: String,
    pub kind: StoryKind,
    pub xml: XmlDocument,
}

impl Story {
    pub fn new(part: impl Into<String>, kind: StoryKind, xml: XmlDocument) -> Self {
        Self {
            part: part.into(),
            kind,
            xml,
        }
    }

    /// Paragraphs in reading order. For the body: its direct paragraphs, then
    /// the paragraphs of its top-level tables row by row, cell by cell.
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        let nodes = match self.kind {
            StoryKind::Body => {
                let mut nodes = body_paragraphs(&self.xml);
                nodes.extend(table_cell_paragraphs(&self.xml));
                nodes
            }
            StoryKind::Header | StoryKind::Footer => self
                .xml
                .root()
                .map(|root| self.xml.elements_by_name(root, W::p()).collect())
                .unwrap_or_default(),
        };

        nodes
            .into_iter()
            .map(|node| Paragraph::read(&self.xml, node))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub node: NodeId,
    pub has_drawing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub node: NodeId,
    /// `w:pStyle/@w:val`, unresolved.
    pub style_id: Option<String>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn read(doc: &XmlDocument, node: NodeId) -> Self {
        Self {
            node,
            style_id: paragraph_style_id(doc, node),
            runs: paragraph_runs(doc, node)
                .into_iter()
                .map(|run| Run {
                    node: run,
                    has_drawing: has_drawing(doc, run),
                })
                .collect(),
        }
    }

    pub fn run_texts(&self, doc: &XmlDocument) -> Vec<String> {
        self.runs.iter().map(|run| run_text(doc, run.node)).collect()
    }

    /// Visible text: the concatenation of the run texts.
    pub fn text(&self, doc: &XmlDocument) -> String {
        self.run_texts(doc).concat()
    }

    pub fn has_drawing(&self) -> bool {
        self.runs.iter().any(|run| run.has_drawing)
    }
}

pub fn find_body(doc: &XmlDocument) -> Option<NodeId> {
    let root = doc.root()?;
    doc.first_child_by_name(root, W::body())
}

pub fn body_paragraphs(doc: &XmlDocument) -> Vec<NodeId> {
    find_body(doc)
        .map(|body| doc.elements_by_name(body, W::p()).collect())
        .unwrap_or_default()
}

/// Top-level body tables, in order.
pub fn body_tables(doc: &XmlDocument) -> Vec<NodeId> {
    find_body(doc)
        .map(|body| doc.elements_by_name(body, W::tbl()).collect())
        .unwrap_or_default()
}

/// Cells of a table, row-major.
pub fn table_cells(doc: &XmlDocument, table: NodeId) -> Vec<NodeId> {
    doc.elements_by_name(table, W::tr())
        .flat_map(|row| doc.elements_by_name(row, W::tc()))
        .collect()
}

pub fn cell_paragraphs(doc: &XmlDocument, cell: NodeId) -> Vec<NodeId> {
    doc.elements_by_name(cell, W::p()).collect()
}

pub fn table_cell_paragraphs(doc: &XmlDocument) -> Vec<NodeId> {
    body_tables(doc)
        .into_iter()
        .flat_map(|table| table_cells(doc, table))
        .flat_map(|cell| cell_paragraphs(doc, cell))
        .collect()
}

pub fn paragraph_properties(doc: &XmlDocument, paragraph: NodeId) -> Option<NodeId> {
    doc.first_child_by_name(paragraph, W::pPr())
}

pub fn paragraph_style_id(doc: &XmlDocument, paragraph: NodeId) -> Option<String> {
    let ppr = paragraph_properties(doc, paragraph)?;
    let style = doc.first_child_by_name(ppr, W::pStyle())?;
    doc.attribute(style, &W::val()).map(str::to_string)
}

/// Every `w:r` of the paragraph, including runs inside hyperlinks,
/// insertions, smart tags and content controls. Deleted revisions and nested
/// text boxes are not part of the paragraph's visible text.
pub fn paragraph_runs(doc: &XmlDocument, paragraph: NodeId) -> Vec<NodeId> {
    let (del, txbx, r) = (W::del(), W::txbxContent(), W::r());
    descendants_trimmed(doc, paragraph, move |data| {
        data.name().is_some_and(|name| *name == del || *name == txbx)
    })
    .filter(|&node| doc.is_named(node, &r))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;
    use pretty_assertions::assert_eq;

    const BODY: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
        <w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>
        <w:tbl><w:tr><w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc></w:tr>
               <w:tr><w:tc><w:p><w:r><w:t>A2</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
        <w:p><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink><w:del><w:r><w:t>gone</w:t></w:r></w:del><w:r><w:t> text</w:t></w:r></w:p>
    </w:body></w:document>"#;

    #[test]
    fn body_story_reads_paragraphs_then_cells() {
        let story = Story::new("word/document.xml", StoryKind::Body, parse(BODY).unwrap());
        let texts: Vec<_> = story.paragraphs().iter().map(|p| p.text(&story.xml)).collect();

        assert_eq!(texts, vec!["Intro", "link text", "A1", "B1", "A2"]);
    }

    #[test]
    fn style_id_comes_from_paragraph_properties() {
        let story = Story::new("word/document.xml", StoryKind::Body, parse(BODY).unwrap());
        let styles: Vec<_> = story.paragraphs().into_iter().map(|p| p.style_id).collect();

        assert_eq!(styles[0].as_deref(), Some("Title"));
        assert_eq!(styles[1], None);
    }

    #[test]
    fn header_story_reads_direct_paragraphs() {
        let xml = parse(
            r#"<w:hdr xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:p><w:r><w:t>Page head</w:t></w:r></w:p></w:hdr>"#,
        )
        .unwrap();
        let story = Story::new("word/header1.xml", StoryKind::Header, xml);

        let paragraphs = story.paragraphs();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text(&story.xml), "Page head");
    }
}
