//! Style catalog: the document's style definitions, the dependency graph
//! between paragraph styles, and per-style formatting metadata.

use super::document::WmlDocument;
use super::inventory::{extract_text, TextRecord};
use crate::error::Result;
use crate::xml::namespaces::W;
use crate::xml::{XName, XmlDocument};
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Style name reported when a paragraph's style cannot be determined.
pub const UNKNOWN_STYLE: &str = "Unknown";

/// Built-in styles whose stored name is lower case; Word shows them
/// capitalized.
const UI_ALIASES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
];

pub fn ui_style_name(name: &str) -> String {
    UI_ALIASES
        .iter()
        .find(|(internal, _)| *internal == name)
        .map(|(_, ui)| ui.to_string())
        .unwrap_or_else(|| name.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    List,
}

impl StyleType {
    /// `w:type`; Word treats a style without one as a paragraph style.
    pub fn from_word(value: Option<&str>) -> Self {
        match value {
            Some("character") => StyleType::Character,
            Some("table") => StyleType::Table,
            Some("numbering") => StyleType::List,
            _ => StyleType::Paragraph,
        }
    }
}

/// Formatting read straight from a style definition, without inheritance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    /// `w:rFonts/@w:ascii`
    pub font: Option<String>,
    /// Points.
    pub size: Option<f64>,
    /// Line spacing: a multiple for `auto` rules, points otherwise.
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefinition {
    pub style_id: String,
    /// Display name.
    pub name: String,
    pub style_type: StyleType,
    pub based_on: Option<String>,
    pub next: Option<String>,
    pub is_default: bool,
    pub properties: StyleProperties,
}

/// The styles part, indexed by style id.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: Vec<StyleDefinition>,
    by_id: HashMap<String, usize>,
    default_paragraph: Option<usize>,
}

impl StyleSheet {
    /// An empty sheet when the document has no styles part.
    pub fn load(doc: &WmlDocument) -> Result<Self> {
        Ok(doc
            .styles()?
            .map(|xml| Self::from_xml(&xml))
            .unwrap_or_default())
    }

    pub fn from_xml(xml: &XmlDocument) -> Self {
        let mut sheet = Self::default();
        let Some(root) = xml.root() else {
            return sheet;
        };

        for node in xml.elements_by_name(root, W::style()) {
            let definition = read_style(xml, node);
            if sheet.by_id.contains_key(&definition.style_id) {
                debug!(style_id = %definition.style_id, "duplicate style id ignored");
                continue;
            }

            let index = sheet.styles.len();
            if definition.is_default
                && definition.style_type == StyleType::Paragraph
                && sheet.default_paragraph.is_none()
            {
                sheet.default_paragraph = Some(index);
            }
            sheet.by_id.insert(definition.style_id.clone(), index);
            sheet.styles.push(definition);
        }

        sheet
    }

    pub fn get(&self, style_id: &str) -> Option<&StyleDefinition> {
        self.by_id.get(style_id).map(|&index| &self.styles[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn default_paragraph_style(&self) -> Option<&StyleDefinition> {
        self.default_paragraph.map(|index| &self.styles[index])
    }

    /// Display name of a paragraph's style. A missing or unresolvable
    /// reference falls back to the default paragraph style, then to
    /// [`UNKNOWN_STYLE`].
    pub fn paragraph_style_name(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.get(id))
            .filter(|style| style.style_type == StyleType::Paragraph)
            .or_else(|| self.default_paragraph_style())
            .map(|style| style.name.clone())
            .unwrap_or_else(|| UNKNOWN_STYLE.to_string())
    }
}

/// Follows a chain of child element names down from `parent`.
fn child_at(xml: &XmlDocument, parent: NodeId, path: &[XName]) -> Option<NodeId> {
    path.iter()
        .try_fold(parent, |node, name| xml.first_child_by_name(node, name.clone()))
}

fn read_style(xml: &XmlDocument, node: NodeId) -> StyleDefinition {
    let style_id = xml
        .attribute(node, &W::styleId())
        .unwrap_or_default()
        .to_string();
    let val_of = |name: XName| {
        xml.first_child_by_name(node, name)
            .and_then(|target| xml.attribute(target, &W::val()))
            .map(str::to_string)
    };

    let name = val_of(W::name())
        .map(|name| ui_style_name(&name))
        .unwrap_or_else(|| style_id.clone());

    StyleDefinition {
        name,
        style_type: StyleType::from_word(xml.attribute(node, &W::type_())),
        based_on: val_of(W::basedOn()),
        next: val_of(W::next()),
        is_default: matches!(xml.attribute(node, &W::default()), Some("1" | "true" | "on")),
        properties: read_properties(xml, node),
        style_id,
    }
}

fn read_properties(xml: &XmlDocument, node: NodeId) -> StyleProperties {
    let font = child_at(xml, node, &[W::rPr(), W::rFonts()])
        .and_then(|fonts| xml.attribute(fonts, &W::ascii()))
        .map(str::to_string);

    let size = child_at(xml, node, &[W::rPr(), W::sz()])
        .and_then(|sz| xml.attribute(sz, &W::val()))
        .and_then(|val| val.parse::<f64>().ok())
        .map(|half_points| half_points / 2.0);

    let spacing = child_at(xml, node, &[W::pPr(), W::spacing()]).and_then(|spacing| {
        let line = xml.attribute(spacing, &W::line())?.parse::<f64>().ok()?;
        match xml.attribute(spacing, &W::lineRule()) {
            None | Some("auto") => Some(line / 240.0),
            Some(_) => Some(line / 20.0),
        }
    });

    StyleProperties { font, size, spacing }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    BasedOn,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// Nodes are style names in the order the styles part lists them. Edges run
/// base -> derived and style -> next style, for paragraph styles only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<StyleEdge>,
    /// Style ids referenced by `w:basedOn`/`w:next` that name no style.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

impl StyleGraph {
    pub fn build(sheet: &StyleSheet) -> Self {
        let mut graph = Self::default();
        let mut visited = HashSet::new();

        for style in sheet.iter() {
            if !visited.insert(style.style_id.as_str()) {
                continue;
            }
            graph.nodes.push(style.name.clone());

            if style.style_type != StyleType::Paragraph {
                continue;
            }

            if let Some(base_id) = &style.based_on {
                match sheet.get(base_id) {
                    Some(base) => graph.edges.push(StyleEdge {
                        from: base.name.clone(),
                        to: style.name.clone(),
                        kind: EdgeKind::BasedOn,
                    }),
                    None => graph.unresolved.push(base_id.clone()),
                }
            }

            if let Some(next_id) = &style.next {
                match sheet.get(next_id) {
                    Some(next) => graph.edges.push(StyleEdge {
                        from: style.name.clone(),
                        to: next.name.clone(),
                        kind: EdgeKind::Next,
                    }),
                    None => graph.unresolved.push(next_id.clone()),
                }
            }
        }

        graph
    }
}

/// Everything a caller needs before writing replacement directives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleMap {
    pub style_graph: StyleGraph,
    pub style_properties: BTreeMap<String, StyleProperties>,
    pub text_content: Vec<TextRecord>,
}

pub fn build_style_map(doc: &WmlDocument) -> Result<StyleMap> {
    let sheet = StyleSheet::load(doc)?;
    let style_graph = StyleGraph::build(&sheet);

    let mut style_properties = BTreeMap::new();
    for style in sheet.iter() {
        style_properties
            .entry(style.name.clone())
            .or_insert_with(|| style.properties.clone());
    }

    let text_content = extract_text(doc)?;

    info!(
        styles = style_graph.nodes.len(),
        edges = style_graph.edges.len(),
        records = text_content.len(),
        "built style map"
    );

    Ok(StyleMap {
        style_graph,
        style_properties,
        text_content,
    })
}
