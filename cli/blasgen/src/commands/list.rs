//! `blasgen list` — print the decoded record table for a corpus.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use blasgen_core::parse_corpus;

use crate::config::BlasgenConfig;

/// Parse the configured corpus and print one line per decoded record.
pub fn run(project_dir: &Path, config: &BlasgenConfig, as_json: bool) -> Result<()> {
    let source_path = project_dir.join(&config.source.declarations);
    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("reading {}", source_path.display()))?;
    let corpus = parse_corpus(&source)?;

    if as_json {
        let records: Vec<_> = corpus
            .records()
            .iter()
            .map(|r| {
                json!({
                    "name": r.bare_name,
                    "element_kind": r.element_kind.map(|k| k.rust_type()),
                    "operation": r.operation,
                    "generic_name": r.generic_name,
                    "args": r.args.len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{:<14} {:<14} {:<12} {:<20} {:>4}",
        "NAME", "KIND", "OPERATION", "GENERIC", "ARGS"
    );
    for record in corpus.records() {
        let kind = record
            .element_kind
            .map(|k| k.rust_type())
            .unwrap_or("-");
        println!(
            "{:<14} {:<14} {:<12} {:<20} {:>4}",
            record.bare_name,
            kind,
            record.operation,
            record.generic_name,
            record.args.len()
        );
    }
    println!("{} routines", corpus.records().len());

    Ok(())
}
