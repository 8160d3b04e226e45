mod document;
mod drawings;
mod embedded;
mod inventory;
pub mod model;
mod replace;
mod settings;
mod styles;
pub mod text;
mod validate;

pub use document::WmlDocument;
pub use drawings::{audit_drawings, drawing_fingerprints, DrawingAudit};
pub use embedded::{parse_mapping, translate_embedded, EmbeddedStats, TranslateResult};
pub use inventory::{extract_text, TextRecord};
pub use replace::{
    distribute_across_runs, parse_directives, replace, ReplaceResult, ReplaceStats, ReplacementDirective,
};
pub use settings::{OutputSettings, ReplaceSettings};
pub use styles::{
    build_style_map, ui_style_name, EdgeKind, StyleDefinition, StyleEdge, StyleGraph, StyleMap,
    StyleProperties, StyleSheet, StyleType, UNKNOWN_STYLE,
};
pub use validate::{format_descriptor, validate_formatting, ParagraphFormatMatch};
