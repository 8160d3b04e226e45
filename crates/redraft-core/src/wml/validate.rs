//! Positional formatting comparison between an original document and its
//! edited copy.
//!
//! Body paragraphs are paired by index only. An inserted or deleted
//! paragraph shifts every later pair, so low scores after such an edit do not
//! mean formatting was lost; callers that need structural diffs must align
//! paragraphs themselves.

use super::document::WmlDocument;
use super::model::{body_paragraphs, paragraph_properties, paragraph_style_id};
use super::styles::StyleSheet;
use crate::error::Result;
use crate::util::similarity_ratio;
use crate::xml::namespaces::W;
use crate::xml::{XName, XmlDocument};
use indextree::NodeId;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphFormatMatch {
    pub original_style: String,
    pub translated_style: String,
    /// 1.0 when both descriptors are identical.
    pub format_match: f64,
}

const MISSING: &str = "-";

/// The paragraph's direct formatting as a `key=value;...` string.
pub fn format_descriptor(xml: &XmlDocument, paragraph: NodeId, style_name: &str) -> String {
    let ppr = paragraph_properties(xml, paragraph);
    let child = |name: XName| ppr.and_then(|ppr| xml.first_child_by_name(ppr, name));
    let attr = |node: Option<NodeId>, names: &[XName]| -> String {
        node.and_then(|node| names.iter().find_map(|name| xml.attribute(node, name)))
            .unwrap_or(MISSING)
            .to_string()
    };
    let toggle = |name: XName| -> String {
        match child(name) {
            None => MISSING.to_string(),
            Some(node) => match xml.attribute(node, &W::val()) {
                Some("0" | "false" | "off") => "false".to_string(),
                _ => "true".to_string(),
            },
        }
    };

    let jc = child(W::jc());
    let spacing = child(W::spacing());
    let ind = child(W::ind());

    let fields = [
        ("style", style_name.to_string()),
        ("align", attr(jc, &[W::val()])),
        ("before", attr(spacing, &[W::before()])),
        ("after", attr(spacing, &[W::after()])),
        ("line", attr(spacing, &[W::line()])),
        ("line_rule", attr(spacing, &[W::lineRule()])),
        ("left", attr(ind, &[W::left(), W::start()])),
        ("right", attr(ind, &[W::right(), W::end()])),
        ("first_line", attr(ind, &[W::firstLine()])),
        ("hanging", attr(ind, &[W::hanging()])),
        ("keep_next", toggle(W::keepNext())),
        ("keep_lines", toggle(W::keepLines())),
        ("page_break_before", toggle(W::pageBreakBefore())),
    ];

    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(";")
}

fn descriptors(doc: &WmlDocument) -> Result<Vec<(String, String)>> {
    let sheet = StyleSheet::load(doc)?;
    let xml = doc.main_document()?;

    Ok(body_paragraphs(&xml)
        .into_iter()
        .map(|paragraph| {
            let style = sheet.paragraph_style_name(paragraph_style_id(&xml, paragraph).as_deref());
            let descriptor = format_descriptor(&xml, paragraph, &style);
            (style, descriptor)
        })
        .collect())
}

/// Scores each positional pair of body paragraphs. The report is as long as
/// the shorter document.
pub fn validate_formatting(original: &WmlDocument, edited: &WmlDocument) -> Result<Vec<ParagraphFormatMatch>> {
    let before = descriptors(original)?;
    let after = descriptors(edited)?;

    if before.len() != after.len() {
        info!(
            original = before.len(),
            edited = after.len(),
            "paragraph counts differ; comparing the common prefix"
        );
    }

    Ok(before
        .into_iter()
        .zip(after)
        .map(|((original_style, a), (translated_style, b))| ParagraphFormatMatch {
            format_match: similarity_ratio(&a, &b),
            original_style,
            translated_style,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;

    #[test]
    fn descriptor_lists_every_field_with_placeholders() {
        let xml = parse(
            r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:pPr>
                <w:keepNext/><w:keepLines w:val="0"/><w:spacing w:after="120"/><w:ind w:start="720"/><w:jc w:val="both"/>
            </w:pPr></w:p>"#,
        )
        .unwrap();
        let p = xml.root().unwrap();

        insta::assert_snapshot!(
            format_descriptor(&xml, p, "Normal"),
            @"style=Normal;align=both;before=-;after=120;line=-;line_rule=-;left=720;right=-;first_line=-;hanging=-;keep_next=true;keep_lines=false;page_break_before=-"
        );
    }

    #[test]
    fn paragraph_without_properties_is_all_placeholders() {
        let xml = parse(r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#).unwrap();
        let descriptor = format_descriptor(&xml, xml.root().unwrap(), "Unknown");
        assert!(descriptor.starts_with("style=Unknown;align=-;"));
    }
}
