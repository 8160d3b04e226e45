mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Command, Config};
use redraft_core::{
    audit_drawings, build_style_map, extract_text, parse_directives, parse_mapping, replace,
    translate_embedded, validate_formatting, WmlDocument,
};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    run(&config)
}

fn run(config: &Config) -> Result<()> {
    match &config.command {
        Command::Styles(args) => {
            let doc = open(&args.file)?;
            emit(config, &build_style_map(&doc)?)
        }

        Command::Extract { document, rows } => {
            let doc = open(&document.file)?;
            let records = extract_text(&doc)?;
            if *rows {
                let rows: Vec<_> = records.into_iter().map(|r| r.into_row()).collect();
                emit(config, &rows)
            } else {
                emit(config, &records)
            }
        }

        Command::Replace {
            document,
            directives: source,
            no_chart_series,
        } => {
            let doc = open(&document.file)?;
            let directives = parse_directives(&read(source)?)
                .with_context(|| format!("Invalid directives in {}", source.display()))?;
            let settings = Config::replace_settings(*no_chart_series);

            let result = replace(&doc, &directives, &settings)?;
            let path = result.document.save_to(&config.output_settings())?;
            info!(path = %path.display(), "saved edited document");

            emit(config, &json!({ "path": path, "stats": result.stats }))
        }

        Command::Translate {
            document,
            mapping: source,
        } => {
            let doc = open(&document.file)?;
            let mapping = parse_mapping(&read(source)?)
                .with_context(|| format!("Invalid mapping in {}", source.display()))?;

            let result = translate_embedded(&doc, &mapping)?;
            let path = result.document.save_to(&config.output_settings())?;
            info!(path = %path.display(), "saved edited document");

            emit(config, &json!({ "path": path, "stats": result.stats }))
        }

        Command::Validate(pair) => {
            let original = open(&pair.original)?;
            let edited = open(&pair.edited)?;
            emit(config, &validate_formatting(&original, &edited)?)
        }

        Command::Drawings(pair) => {
            let original = open(&pair.original)?;
            let edited = open(&pair.edited)?;
            let audit = audit_drawings(&original, &edited)?;
            if !audit.preserved {
                tracing::warn!(missing = audit.missing.len(), "drawings lost in edited document");
            }
            emit(config, &audit)
        }
    }
}

fn open(path: &Path) -> Result<WmlDocument> {
    WmlDocument::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn emit<T: Serialize + ?Sized>(config: &Config, value: &T) -> Result<()> {
    let text = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
