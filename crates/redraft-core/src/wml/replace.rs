//! Style-scoped text replacement that keeps run structure and drawings.
//!
//! Directives are applied per story, in the order given, to every paragraph
//! whose style matches. Once a run has been rewritten by a directive no later
//! directive may touch it, so feeding the same text back twice cannot
//! substitute twice.

use super::document::WmlDocument;
use super::embedded::{chart_series, series_name, set_series_name};
use super::inventory::TextRecord;
use super::model::Paragraph;
use super::settings::ReplaceSettings;
use super::styles::StyleSheet;
use super::text::set_run_text;
use crate::error::{RedraftError, Result};
use crate::xml::XmlDocument;
use indextree::NodeId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// A caller's request to rewrite text under a given paragraph style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DirectiveWire", into = "DirectiveWire")]
pub enum ReplacementDirective {
    /// Matches a paragraph whose whole trimmed text equals `text`; falls back
    /// to substring replacement inside single runs.
    Flat {
        style: String,
        text: String,
        translated_text: String,
    },
    /// Without a suffix, matches a run whose trimmed text equals `prefix`.
    /// With one, replaces whatever lies between the two anchors.
    Contextual {
        style: String,
        prefix: String,
        suffix: Option<String>,
        translated: String,
    },
}

impl ReplacementDirective {
    pub fn flat(style: impl Into<String>, text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self::Flat {
            style: style.into(),
            text: text.into(),
            translated_text: translated_text.into(),
        }
    }

    pub fn contextual(
        style: impl Into<String>,
        prefix: impl Into<String>,
        suffix: Option<&str>,
        translated: impl Into<String>,
    ) -> Self {
        Self::Contextual {
            style: style.into(),
            prefix: prefix.into(),
            suffix: suffix.filter(|s| !s.is_empty()).map(str::to_string),
            translated: translated.into(),
        }
    }

    pub fn style(&self) -> &str {
        match self {
            Self::Flat { style, .. } | Self::Contextual { style, .. } => style,
        }
    }

    fn compile(&self) -> Result<Compiled<'_>> {
        match self {
            Self::Flat { text, translated_text, .. } => Ok(Compiled::Flat {
                text: text.trim(),
                translated: translated_text.trim(),
            }),
            Self::Contextual { style, prefix, suffix, translated } => {
                let prefix = prefix.trim();
                if prefix.is_empty() {
                    return Err(RedraftError::InvalidDirective {
                        style: style.clone(),
                        message: "contextual directive needs a prefix".to_string(),
                    });
                }
                match suffix.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    None => Ok(Compiled::Exact { prefix, translated }),
                    Some(suffix) => {
                        let pattern = format!(
                            r"(?s){}\s*(.*?)\s*{}",
                            regex::escape(prefix),
                            regex::escape(suffix)
                        );
                        let regex = Regex::new(&pattern).map_err(|e| RedraftError::InvalidDirective {
                            style: style.clone(),
                            message: e.to_string(),
                        })?;
                        Ok(Compiled::Anchored { regex, translated })
                    }
                }
            }
        }
    }
}

impl From<TextRecord> for ReplacementDirective {
    fn from(record: TextRecord) -> Self {
        Self::Flat {
            style: record.style,
            text: record.text,
            translated_text: record.translated_text,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ContextWire {
    prefix: String,
    #[serde(default)]
    suffix: String,
    style: String,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DirectiveWire {
    Contextual {
        context: ContextWire,
        translated: String,
    },
    Flat {
        style: String,
        text: String,
        #[serde(default)]
        translated_text: String,
    },
    Row(String, String, String),
}

impl From<DirectiveWire> for ReplacementDirective {
    fn from(wire: DirectiveWire) -> Self {
        match wire {
            DirectiveWire::Contextual { context, translated } => {
                Self::contextual(context.style, context.prefix, Some(context.suffix.as_str()), translated)
            }
            DirectiveWire::Flat { style, text, translated_text } => Self::flat(style, text, translated_text),
            DirectiveWire::Row(style, text, translated_text) => Self::flat(style, text, translated_text),
        }
    }
}

impl From<ReplacementDirective> for DirectiveWire {
    fn from(directive: ReplacementDirective) -> Self {
        match directive {
            ReplacementDirective::Flat { style, text, translated_text } => {
                DirectiveWire::Flat { style, text, translated_text }
            }
            ReplacementDirective::Contextual { style, prefix, suffix, translated } => DirectiveWire::Contextual {
                context: ContextWire {
                    prefix,
                    suffix: suffix.unwrap_or_default(),
                    style,
                },
                translated,
            },
        }
    }
}

/// Reads a JSON array mixing any of the accepted directive shapes.
pub fn parse_directives(json: &[u8]) -> Result<Vec<ReplacementDirective>> {
    Ok(serde_json::from_slice(json)?)
}

enum Compiled<'a> {
    Flat { text: &'a str, translated: &'a str },
    Exact { prefix: &'a str, translated: &'a str },
    Anchored { regex: Regex, translated: &'a str },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceStats {
    pub paragraphs_changed: usize,
    pub runs_touched: usize,
    pub chart_series_renamed: usize,
}

pub struct ReplaceResult {
    pub document: WmlDocument,
    pub stats: ReplaceStats,
}

/// Splits `target` over runs of the given character lengths, in order. Runs
/// past the end of `target` get nothing; characters left after the last
/// non-empty run are appended to it, so the pieces always concatenate back
/// to `target`.
pub fn distribute_across_runs(lengths: &[usize], target: &str) -> Vec<String> {
    let chars: Vec<char> = target.chars().collect();
    let mut pos = 0;
    let mut pieces: Vec<String> = lengths
        .iter()
        .map(|&len| {
            let end = (pos + len).min(chars.len());
            let piece = chars[pos..end].iter().collect();
            pos = end;
            piece
        })
        .collect();

    if pos < chars.len() {
        let rest: String = chars[pos..].iter().collect();
        let last = lengths.iter().rposition(|&len| len > 0).or(pieces.len().checked_sub(1));
        if let Some(index) = last {
            pieces[index].push_str(&rest);
        }
    }

    pieces
}

/// Applies `directives` to a copy of `doc`.
pub fn replace(
    doc: &WmlDocument,
    directives: &[ReplacementDirective],
    settings: &ReplaceSettings,
) -> Result<ReplaceResult> {
    let compiled = directives
        .iter()
        .map(|directive| directive.compile().map(|c| (directive.style(), c)))
        .collect::<Result<Vec<_>>>()?;

    let sheet = StyleSheet::load(doc)?;
    let mut stories = doc.load_stories()?;
    let mut stats = ReplaceStats::default();

    for story in &mut stories {
        let paragraphs: Vec<(String, Paragraph)> = story
            .paragraphs()
            .into_iter()
            .map(|p| (sheet.paragraph_style_name(p.style_id.as_deref()), p))
            .collect();
        let mut claimed: HashSet<NodeId> = HashSet::new();
        let mut changed: HashSet<NodeId> = HashSet::new();

        for (index, (style, directive)) in compiled.iter().enumerate() {
            let mut touched = HashSet::new();

            for (paragraph_style, paragraph) in &paragraphs {
                if paragraph_style != style {
                    continue;
                }
                let rewritten = match directive {
                    Compiled::Flat { text, translated } => {
                        apply_flat(&mut story.xml, paragraph, text, translated, &claimed)
                    }
                    Compiled::Exact { prefix, translated } => {
                        apply_exact(&mut story.xml, paragraph, prefix, translated, &claimed)
                    }
                    Compiled::Anchored { regex, translated } => {
                        apply_anchored(&mut story.xml, paragraph, regex, translated, &claimed)
                    }
                };
                if !rewritten.is_empty() {
                    changed.insert(paragraph.node);
                    stats.runs_touched += rewritten.len();
                    touched.extend(rewritten);
                }
            }

            if !touched.is_empty() {
                debug!(directive = index, style = %style, part = %story.part, runs = touched.len(), "applied directive");
            }
            claimed.extend(touched);
        }
        stats.paragraphs_changed += changed.len();
    }

    let mut edited = doc.with_stories(&stories)?;

    if settings.rename_chart_series {
        stats.chart_series_renamed = rename_series_from_directives(&mut edited, &compiled)?;
    }

    info!(
        directives = directives.len(),
        paragraphs = stats.paragraphs_changed,
        runs = stats.runs_touched,
        series = stats.chart_series_renamed,
        "replacement pass finished"
    );

    Ok(ReplaceResult { document: edited, stats })
}

fn write_run(xml: &mut XmlDocument, run: NodeId, old: &str, new: &str, rewritten: &mut Vec<NodeId>) {
    if old != new {
        set_run_text(xml, run, new);
    }
    rewritten.push(run);
}

fn apply_flat(
    xml: &mut XmlDocument,
    paragraph: &Paragraph,
    text: &str,
    translated: &str,
    claimed: &HashSet<NodeId>,
) -> Vec<NodeId> {
    let mut rewritten = Vec::new();
    if text.is_empty() {
        return rewritten;
    }

    let texts = paragraph.run_texts(xml);

    if texts.concat().trim() == text {
        if paragraph.runs.iter().any(|run| claimed.contains(&run.node)) {
            return rewritten;
        }
        let lengths: Vec<usize> = texts.iter().map(|t| t.chars().count()).collect();
        let pieces = distribute_across_runs(&lengths, translated);
        for ((run, old), new) in paragraph.runs.iter().zip(&texts).zip(&pieces) {
            write_run(xml, run.node, old, new, &mut rewritten);
        }
        return rewritten;
    }

    for (run, old) in paragraph.runs.iter().zip(&texts) {
        if claimed.contains(&run.node) || !old.contains(text) {
            continue;
        }
        let new = old.replace(text, translated);
        write_run(xml, run.node, old, &new, &mut rewritten);
    }
    rewritten
}

fn apply_exact(
    xml: &mut XmlDocument,
    paragraph: &Paragraph,
    prefix: &str,
    translated: &str,
    claimed: &HashSet<NodeId>,
) -> Vec<NodeId> {
    let mut rewritten = Vec::new();
    for (run, old) in paragraph.runs.iter().zip(paragraph.run_texts(xml)) {
        if claimed.contains(&run.node) || old.trim() != prefix {
            continue;
        }
        write_run(xml, run.node, &old, translated, &mut rewritten);
    }
    rewritten
}

fn apply_anchored(
    xml: &mut XmlDocument,
    paragraph: &Paragraph,
    regex: &Regex,
    translated: &str,
    claimed: &HashSet<NodeId>,
) -> Vec<NodeId> {
    let original = paragraph.run_texts(xml);
    let full = original.concat();

    // byte range of each run inside `full`
    let mut bounds = Vec::with_capacity(original.len());
    let mut offset = 0;
    for text in &original {
        bounds.push((offset, offset + text.len()));
        offset += text.len();
    }

    // (whole match, replaced region) byte ranges
    let matches: Vec<((usize, usize), (usize, usize))> = regex
        .captures_iter(&full)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let region = caps.get(1)?;
            let overlaps_claimed = paragraph.runs.iter().zip(&bounds).any(|(run, &(lo, hi))| {
                lo < whole.end() && whole.start() < hi && claimed.contains(&run.node)
            });
            (!overlaps_claimed).then_some(((whole.start(), whole.end()), (region.start(), region.end())))
        })
        .collect();

    if matches.is_empty() {
        return Vec::new();
    }

    let mut texts = original.clone();
    for &(_, (start, end)) in matches.iter().rev() {
        splice_region(&mut texts, &bounds, start, end, translated);
    }

    // Every run under a match is claimed, anchors included, even when its
    // text came out unchanged.
    let mut rewritten = Vec::new();
    for (((run, old), new), &(lo, hi)) in paragraph.runs.iter().zip(&original).zip(&texts).zip(&bounds) {
        let covered = matches.iter().any(|&((start, end), _)| lo < end && start < hi);
        if covered {
            write_run(xml, run.node, old, new, &mut rewritten);
        }
    }
    rewritten
}

/// Replaces bytes `start..end` of the concatenated run text with
/// `replacement`. The replacement lands in the run where the region starts;
/// the rest of the region is cut from the runs that follow. `bounds` are the
/// run ranges before any splice, so regions must be applied back to front.
fn splice_region(texts: &mut [String], bounds: &[(usize, usize)], start: usize, end: usize, replacement: &str) {
    let owner = bounds
        .iter()
        .position(|&(lo, hi)| lo <= start && start < hi)
        .or_else(|| bounds.iter().rposition(|&(lo, hi)| hi == start && lo < hi));
    let Some(owner) = owner else {
        return;
    };

    for (index, &(lo, hi)) in bounds.iter().enumerate().skip(owner) {
        if index != owner && lo >= end {
            break;
        }
        let cut_lo = start.max(lo) - lo;
        let cut_hi = end.min(hi).max(start.max(lo)) - lo;
        let text = &mut texts[index];
        if index == owner {
            text.replace_range(cut_lo..cut_hi, replacement);
        } else {
            text.replace_range(cut_lo..cut_hi, "");
        }
    }
}

fn rename_series_from_directives(doc: &mut WmlDocument, compiled: &[(&str, Compiled<'_>)]) -> Result<usize> {
    let flats: Vec<(&str, &str)> = compiled
        .iter()
        .filter_map(|(_, directive)| match directive {
            Compiled::Flat { text, translated } if !text.is_empty() => Some((*text, *translated)),
            _ => None,
        })
        .collect();
    if flats.is_empty() {
        return Ok(0);
    }

    let main = doc.main_document()?;
    let mut renamed = 0;

    for part in doc.chart_parts(&main)? {
        let mut chart = doc.package().get_xml_part(&part)?;
        let mut changed = 0;

        for series in chart_series(&chart) {
            let Some(name) = series_name(&chart, series) else {
                continue;
            };
            if let Some((_, translated)) = flats.iter().find(|(text, _)| name.trim() == *text) {
                set_series_name(&mut chart, series, translated);
                changed += 1;
            }
        }

        if changed > 0 {
            doc.package_mut().put_xml_part(&part, &chart)?;
            renamed += changed;
        }
    }

    Ok(renamed)
}
