//! Structured editing of Word (`.docx`) documents: style catalogs, text
//! inventories, style-scoped replacement that keeps drawings intact,
//! table/chart translation and formatting checks.

pub mod error;
pub mod hash;
pub mod package;
pub mod util;
pub mod wml;
pub mod xml;

pub use error::{RedraftError, Result};

pub use wml::{
    audit_drawings, build_style_map, extract_text, parse_directives, parse_mapping, replace,
    translate_embedded, validate_formatting, DrawingAudit, EmbeddedStats, OutputSettings,
    ParagraphFormatMatch, ReplaceResult, ReplaceSettings, ReplaceStats, ReplacementDirective, StyleMap,
    TextRecord, TranslateResult, WmlDocument,
};
