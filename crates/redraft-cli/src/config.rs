use clap::{Args, Parser, Subcommand};
use redraft_core::{OutputSettings, ReplaceSettings};
use std::path::PathBuf;

/// Command-line configuration for `redraft`.
#[derive(Parser, Debug, Clone)]
#[command(name = "redraft")]
#[command(about = "Inspect, translate and validate Word documents", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("REDRAFT_GIT_HASH"), ")"))]
pub struct Config {
    /// Directory edited documents are written to
    #[arg(long, global = true, env = "REDRAFT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Style graph, style properties and text inventory
    Styles(DocumentArgs),

    /// Translatable text records in reading order
    Extract {
        #[command(flatten)]
        document: DocumentArgs,

        /// Emit `[style, text, translated_text]` rows instead of objects
        #[arg(long)]
        rows: bool,
    },

    /// Apply replacement directives and save the edited copy
    Replace {
        #[command(flatten)]
        document: DocumentArgs,

        /// JSON file holding a list of directives
        #[arg(short, long)]
        directives: PathBuf,

        /// Leave chart series names alone
        #[arg(long)]
        no_chart_series: bool,
    },

    /// Translate table cells and chart series from an exact-match mapping
    Translate {
        #[command(flatten)]
        document: DocumentArgs,

        /// JSON file holding an `{"original": "translated"}` object
        #[arg(short, long)]
        mapping: PathBuf,
    },

    /// Compare paragraph formatting of an edited copy against its original
    Validate(PairArgs),

    /// Check that every drawing of the original survived in the edited copy
    Drawings(PairArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Input .docx file
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    #[arg(short, long)]
    pub original: PathBuf,

    #[arg(short, long)]
    pub edited: PathBuf,
}

impl Config {
    pub fn output_settings(&self) -> OutputSettings {
        match &self.output_dir {
            Some(dir) => OutputSettings::new().with_output_dir(dir),
            None => OutputSettings::default(),
        }
    }

    pub fn replace_settings(no_chart_series: bool) -> ReplaceSettings {
        ReplaceSettings::new().with_chart_series(!no_chart_series)
    }
}
