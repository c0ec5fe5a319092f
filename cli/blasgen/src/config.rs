//! `blasgen.toml` parsing and output-group configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The top-level configuration for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlasgenConfig {
    /// Declaration source (required).
    pub source: SourceConfig,
    /// Output groups, rendered independently from the same parsed corpus.
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupConfig>,
}

/// Declaration source section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the declarations file, relative to the config directory.
    pub declarations: PathBuf,
}

/// One named output group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Group name, used by `--group` selection.
    pub name: String,
    /// Output file path, relative to the config directory.
    pub output: PathBuf,
    /// Name of the generated trait.
    pub trait_name: String,
    /// Module doc line of the generated file.
    #[serde(default = "default_doc")]
    pub doc: String,
    /// Literal import lines emitted at the top of the generated file.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Operation substrings selecting routines into this group.
    #[serde(default)]
    pub operations: Vec<String>,
    /// Exact bare names removed from the selection.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_doc() -> String {
    "Abstracting the BLAS scalar types".to_string()
}

impl BlasgenConfig {
    /// Load a configuration from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: BlasgenConfig =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Search upward from `start_dir` for a `blasgen.toml`, parse and return
    /// it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("blasgen.toml");
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing blasgen.toml")
    }
}
