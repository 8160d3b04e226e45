use super::document::WmlDocument;
use super::styles::StyleSheet;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One translatable paragraph. Serializes in the flat directive shape so a
/// caller can fill `translated_text` and hand the record straight back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub style: String,
    pub text: String,
    #[serde(default)]
    pub translated_text: String,
}

impl TextRecord {
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
            translated_text: String::new(),
        }
    }

    /// `[style, text, translated_text]`
    pub fn into_row(self) -> [String; 3] {
        [self.style, self.text, self.translated_text]
    }
}

/// Trimmed, non-empty paragraph texts in reading order: body paragraphs,
/// table cell paragraphs, then headers and footers section by section.
pub fn extract_text(doc: &WmlDocument) -> Result<Vec<TextRecord>> {
    let sheet = StyleSheet::load(doc)?;
    let mut records = Vec::new();

    for story in doc.load_stories()? {
        for paragraph in story.paragraphs() {
            let text = paragraph.text(&story.xml);
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let style = sheet.paragraph_style_name(paragraph.style_id.as_deref());
            records.push(TextRecord::new(style, text));
        }
    }

    tracing::debug!(records = records.len(), "extracted text inventory");
    Ok(records)
}
