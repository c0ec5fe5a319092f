//! `blasgen generate` — run the pipeline and write output groups.
//!
//! Two-phase: every selected group is rendered to memory first; files are
//! written only after all groups rendered cleanly, so a fatal error in any
//! group leaves the filesystem untouched.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use blasgen_core::parse_corpus;
use blasgen_render::{RenderData, Renderer};

use crate::config::{BlasgenConfig, GroupConfig};

/// Run generation for all groups, or for the one named by `group_filter`.
pub fn run(
    project_dir: &Path,
    config: &BlasgenConfig,
    group_filter: Option<&str>,
    preview: bool,
    dry_run: bool,
) -> Result<()> {
    let groups: Vec<&GroupConfig> = match group_filter {
        Some(name) => {
            let Some(group) = config.groups.iter().find(|g| g.name == name) else {
                bail!("no group named '{name}' in blasgen.toml");
            };
            vec![group]
        }
        None => config.groups.iter().collect(),
    };
    if groups.is_empty() {
        println!("No output groups configured — nothing to generate.");
        return Ok(());
    }

    let source_path = project_dir.join(&config.source.declarations);
    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("reading {}", source_path.display()))?;
    let corpus = parse_corpus(&source)?;
    let renderer = Renderer::new()?;

    // Phase one: render everything to memory.
    let mut rendered = Vec::with_capacity(groups.len());
    for group in groups {
        let data = RenderData::assemble(&corpus, &group.imports, &group.operations, &group.exclude);
        let text = renderer
            .render(&group.trait_name, &group.doc, &data)
            .with_context(|| format!("rendering group '{}'", group.name))?;
        rendered.push((group, text));
    }

    // Phase two: all groups rendered cleanly; write (or report).
    for (group, text) in &rendered {
        let output = project_dir.join(&group.output);
        if preview {
            println!("── {} ──", output.display());
            print_highlighted(text);
        }
        if dry_run {
            println!(
                "Would write group '{}' → {} ({} bytes)",
                group.name,
                output.display(),
                text.len()
            );
            continue;
        }
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&output, text).with_context(|| format!("writing {}", output.display()))?;
        println!("Generated group '{}' → {}", group.name, output.display());
    }

    Ok(())
}

/// Print rendered Rust source syntax-highlighted for the terminal.
fn print_highlighted(source: &str) {
    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let theme = theme_set
        .themes
        .get("base16-ocean.dark")
        .unwrap_or_else(|| theme_set.themes.values().next().unwrap());
    let Some(syntax) = syntax_set.find_syntax_by_extension("rs") else {
        print!("{source}");
        return;
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    for line in LinesWithEndings::from(source) {
        match highlighter.highlight_line(line, &syntax_set) {
            Ok(ranges) => print!("{}", as_24_bit_terminal_escaped(&ranges[..], false)),
            Err(_) => print!("{line}"),
        }
    }
    println!("\x1b[0m");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlasgenConfig;

    const DECLS: &str = r#"
        extern "C" {
            pub fn cblas_sgemm(layout: CBLAS_LAYOUT, transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE,
                m: c_int, n: c_int, k: c_int, alpha: c_float, a: *const c_float, lda: c_int,
                b: *const c_float, ldb: c_int, beta: c_float, c: *mut c_float, ldc: c_int);
            pub fn cblas_dgemm(layout: CBLAS_LAYOUT, transa: CBLAS_TRANSPOSE, transb: CBLAS_TRANSPOSE,
                m: c_int, n: c_int, k: c_int, alpha: c_double, a: *const c_double, lda: c_int,
                b: *const c_double, ldb: c_int, beta: c_double, c: *mut c_double, ldc: c_int);
        }
    "#;

    const CONFIG: &str = r#"
[source]
declarations = "cblas.rs"

[[group]]
name = "matmul"
output = "out/scalar.rs"
trait_name = "BlasScalar"
imports = ["use num_complex::Complex;"]
operations = ["gemm"]
"#;

    fn setup(decls: &str) -> (tempfile::TempDir, BlasgenConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cblas.rs"), decls).unwrap();
        fs::write(dir.path().join("blasgen.toml"), CONFIG).unwrap();
        let config = BlasgenConfig::load(&dir.path().join("blasgen.toml")).unwrap();
        (dir, config)
    }

    #[test]
    fn generate_writes_the_group_output() {
        let (dir, config) = setup(DECLS);
        run(dir.path(), &config, None, false, false).unwrap();

        let out = fs::read_to_string(dir.path().join("out/scalar.rs")).unwrap();
        assert!(out.starts_with("// This file is auto-generated."));
        assert!(out.contains("impl BlasScalar for f32 {"));
        assert!(out.contains("cblas_sys::cblas_dgemm("));
    }

    #[test]
    fn generate_is_idempotent() {
        let (dir, config) = setup(DECLS);
        run(dir.path(), &config, None, false, false).unwrap();
        let first = fs::read_to_string(dir.path().join("out/scalar.rs")).unwrap();
        run(dir.path(), &config, None, false, false).unwrap();
        let second = fs::read_to_string(dir.path().join("out/scalar.rs")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (dir, config) = setup(DECLS);
        run(dir.path(), &config, None, false, true).unwrap();
        assert!(!dir.path().join("out/scalar.rs").exists());
    }

    #[test]
    fn unknown_group_name_fails() {
        let (dir, config) = setup(DECLS);
        assert!(run(dir.path(), &config, Some("missing"), false, false).is_err());
    }

    #[test]
    fn fatal_error_leaves_filesystem_untouched() {
        // `workspace` appears in no classification table.
        let (dir, config) = setup(
            r#"extern "C" {
                pub fn cblas_sgemm(workspace: *mut c_float, n: c_int);
            }"#,
        );
        assert!(run(dir.path(), &config, None, false, false).is_err());
        assert!(!dir.path().join("out").exists());
    }
}
