use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options for a replacement pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaceSettings {
    /// Flat directives also rename chart series whose name equals their
    /// source text.
    pub rename_chart_series: bool,
}

impl Default for ReplaceSettings {
    fn default() -> Self {
        Self {
            rename_chart_series: true,
        }
    }
}

impl ReplaceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to toggle chart series renaming.
    pub fn with_chart_series(mut self, rename: bool) -> Self {
        self.rename_chart_series = rename;
        self
    }
}

/// Where edited documents are written.
///
/// Every save gets a fresh `<uuid>.docx` name inside `output_dir`, so the
/// source document is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub output_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: std::env::temp_dir(),
        }
    }
}

impl OutputSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub(crate) fn fresh_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.docx", uuid::Uuid::new_v4()))
    }
}
