//! Exact-match translation of table cells and chart series names.

use super::document::WmlDocument;
use super::model::{body_tables, cell_paragraphs, table_cells, Paragraph, Story, StoryKind};
use super::text::{run_text, set_run_text};
use crate::error::Result;
use crate::xml::namespaces::{C, W};
use crate::xml::{XmlDocument, XmlNodeData};
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedStats {
    pub cells_translated: usize,
    pub chart_series_renamed: usize,
}

pub struct TranslateResult {
    pub document: WmlDocument,
    pub stats: EmbeddedStats,
}

/// Applies an `original -> translated` mapping to a copy of `doc`. Cells of
/// top-level body tables and series of body charts are rewritten only when
/// their whole trimmed text is a key.
pub fn translate_embedded(doc: &WmlDocument, mapping: &BTreeMap<String, String>) -> Result<TranslateResult> {
    let lookup: HashMap<&str, &str> = mapping
        .iter()
        .map(|(original, translated)| (original.trim(), translated.as_str()))
        .filter(|(original, _)| !original.is_empty())
        .collect();

    let mut main = Story::new(
        doc.main_part_path(),
        StoryKind::Body,
        doc.main_document()?,
    );
    let mut stats = EmbeddedStats::default();

    let cells: Vec<NodeId> = body_tables(&main.xml)
        .into_iter()
        .flat_map(|table| table_cells(&main.xml, table))
        .collect();

    for cell in cells {
        let text = cell_text(&main.xml, cell);
        if let Some(translated) = lookup.get(text.trim()) {
            set_cell_text(&mut main.xml, cell, translated);
            stats.cells_translated += 1;
        }
    }

    let chart_parts = doc.chart_parts(&main.xml)?;
    let mut edited = doc.with_stories(std::slice::from_ref(&main))?;

    for part in chart_parts {
        let mut chart = edited.package().get_xml_part(&part)?;
        let mut changed = 0;

        for series in chart_series(&chart) {
            let Some(name) = series_name(&chart, series) else {
                continue;
            };
            if let Some(translated) = lookup.get(name.trim()) {
                set_series_name(&mut chart, series, translated);
                changed += 1;
            }
        }

        if changed > 0 {
            edited.package_mut().put_xml_part(&part, &chart)?;
            stats.chart_series_renamed += changed;
        }
    }

    info!(
        keys = lookup.len(),
        cells = stats.cells_translated,
        series = stats.chart_series_renamed,
        "translated embedded content"
    );

    Ok(TranslateResult { document: edited, stats })
}

/// Reads an `{"original": "translated"}` JSON object.
pub fn parse_mapping(json: &[u8]) -> Result<BTreeMap<String, String>> {
    Ok(serde_json::from_slice(json)?)
}

/// Paragraph texts of the cell joined by newlines.
pub fn cell_text(xml: &XmlDocument, cell: NodeId) -> String {
    cell_paragraphs(xml, cell)
        .into_iter()
        .map(|p| Paragraph::read(xml, p).text(xml))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Puts `text` into the cell's first text run and clears every other run.
/// Paragraphs left without text are dropped unless they hold a drawing, or
/// the cell would no longer end in a paragraph.
fn set_cell_text(xml: &mut XmlDocument, cell: NodeId, text: &str) {
    let paragraphs: Vec<Paragraph> = cell_paragraphs(xml, cell)
        .into_iter()
        .map(|p| Paragraph::read(xml, p))
        .collect();

    let owner = paragraphs.iter().find_map(|p| {
        p.runs
            .iter()
            .find(|run| !run_text(xml, run.node).is_empty())
            .map(|run| (p.node, run.node))
    });

    let (owner_paragraph, owner_run) = match owner {
        Some(found) => found,
        None => {
            let Some(first) = paragraphs.first() else {
                return;
            };
            let run = xml.add_child(first.node, XmlNodeData::element(W::r()));
            (first.node, run)
        }
    };

    let trailing = cell_blocks(xml, cell).last().copied();
    let mut trailing_removable = false;

    for paragraph in &paragraphs {
        for run in &paragraph.runs {
            if run.node != owner_run && !run_text(xml, run.node).is_empty() {
                set_run_text(xml, run.node, "");
            }
        }
        if paragraph.node == owner_paragraph || paragraph.has_drawing() {
            continue;
        }
        if Some(paragraph.node) == trailing {
            trailing_removable = true;
        } else {
            xml.remove(paragraph.node);
        }
    }

    if let Some(trailing) = trailing.filter(|_| trailing_removable) {
        let blocks = cell_blocks(xml, cell);
        let preceded_by_paragraph = blocks
            .len()
            .checked_sub(2)
            .is_some_and(|i| xml.is_named(blocks[i], &W::p()));
        if preceded_by_paragraph {
            xml.remove(trailing);
        }
    }

    set_run_text(xml, owner_run, text);
}

/// Block-level children of a cell: everything but `w:tcPr` and text nodes.
fn cell_blocks(xml: &XmlDocument, cell: NodeId) -> Vec<NodeId> {
    xml.children(cell)
        .filter(|&child| {
            xml.get(child).and_then(|data| data.name()).is_some() && !xml.is_named(child, &W::tcPr())
        })
        .collect()
}

/// Every `c:ser` in the chart, in plot order.
pub fn chart_series(chart: &XmlDocument) -> Vec<NodeId> {
    chart
        .root()
        .map(|root| chart.descendants_by_name(root, C::ser()).collect())
        .unwrap_or_default()
}

/// `c:v` elements carrying the series name: either `c:tx/c:v` or the cached
/// string of `c:tx/c:strRef`.
fn series_name_values(chart: &XmlDocument, series: NodeId) -> Vec<NodeId> {
    let Some(tx) = chart.first_child_by_name(series, C::tx()) else {
        return Vec::new();
    };
    chart.descendants_by_name(tx, C::v()).collect()
}

pub fn series_name(chart: &XmlDocument, series: NodeId) -> Option<String> {
    let first = series_name_values(chart, series).into_iter().next()?;
    Some(chart.inner_text(first))
}

pub fn set_series_name(chart: &mut XmlDocument, series: NodeId, name: &str) {
    let values = series_name_values(chart, series);
    let Some(&first) = values.first() else {
        return;
    };

    let old: Vec<NodeId> = chart.children(first).collect();
    for child in old {
        chart.remove(child);
    }
    chart.add_child(first, XmlNodeData::text(name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;
    use pretty_assertions::assert_eq;

    const CHART: &str = r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:chart><c:plotArea><c:barChart>
        <c:ser><c:tx><c:strRef><c:f>Sheet1!$B$1</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>Revenue</c:v></c:pt></c:strCache></c:strRef></c:tx></c:ser>
        <c:ser><c:tx><c:v>Costs</c:v></c:tx></c:ser>
        <c:ser><c:idx val="2"/></c:ser>
    </c:barChart></c:plotArea></c:chart></c:chartSpace>"#;

    #[test]
    fn mapping_must_be_a_string_object() {
        let mapping = parse_mapping(br#"{"Sales Q1": "Ventas Q1"}"#).unwrap();
        assert_eq!(mapping["Sales Q1"], "Ventas Q1");
        assert!(parse_mapping(br#"["Sales Q1"]"#).is_err());
    }

    #[test]
    fn series_names_come_from_cache_or_literal() {
        let chart = parse(CHART).unwrap();
        let names: Vec<_> = chart_series(&chart).into_iter().map(|s| series_name(&chart, s)).collect();

        assert_eq!(names, vec![Some("Revenue".to_string()), Some("Costs".to_string()), None]);
    }

    #[test]
    fn renaming_a_series_rewrites_its_cached_value() {
        let mut chart = parse(CHART).unwrap();
        let series = chart_series(&chart)[0];

        set_series_name(&mut chart, series, "Ingresos");

        assert_eq!(series_name(&chart, series).as_deref(), Some("Ingresos"));
    }

    #[test]
    fn cell_rewrite_keeps_drawing_paragraphs() {
        let mut xml = parse(
            r#"<w:tc xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
                <w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Sales</w:t></w:r><w:r><w:t> Q1</w:t></w:r></w:p>
                <w:p><w:r><w:t>extra</w:t></w:r></w:p>
                <w:p><w:r><w:drawing/></w:r></w:p>
            </w:tc>"#,
        )
        .unwrap();
        let cell = xml.root().unwrap();

        set_cell_text(&mut xml, cell, "Ventas T1");

        assert_eq!(cell_text(&xml, cell), "Ventas T1\n");
        assert_eq!(cell_paragraphs(&xml, cell).len(), 2);
        let first = cell_paragraphs(&xml, cell)[0];
        assert!(xml.first_child_by_name(first, W::pPr()).is_some());
    }

    #[test]
    fn cell_rewrite_keeps_the_paragraph_after_a_nested_table() {
        let mut xml = parse(
            r#"<w:tc xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
                <w:tcPr><w:tcW w:w="2000"/></w:tcPr>
                <w:p><w:r><w:t>Sales Q1</w:t></w:r></w:p>
                <w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                <w:p><w:r><w:t>note</w:t></w:r></w:p>
            </w:tc>"#,
        )
        .unwrap();
        let cell = xml.root().unwrap();

        set_cell_text(&mut xml, cell, "Ventas T1");

        let blocks = cell_blocks(&xml, cell);
        assert_eq!(blocks.len(), 3);
        assert!(xml.is_named(blocks[1], &W::tbl()));
        assert!(xml.is_named(blocks[2], &W::p()));
        assert_eq!(cell_text(&xml, cell), "Ventas T1\n");
    }

    #[test]
    fn cell_rewrite_drops_trailing_paragraph_after_another_paragraph() {
        let mut xml = parse(
            r#"<w:tc xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
                <w:p><w:r><w:t>Sales</w:t></w:r></w:p>
                <w:p><w:r><w:t>Q1</w:t></w:r></w:p>
            </w:tc>"#,
        )
        .unwrap();
        let cell = xml.root().unwrap();

        set_cell_text(&mut xml, cell, "Ventas T1");

        assert_eq!(cell_blocks(&xml, cell).len(), 1);
        assert_eq!(cell_text(&xml, cell), "Ventas T1");
    }
}
