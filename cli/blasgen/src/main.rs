//! blasgen CLI — typed Rust binding generation for CBLAS declarations.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use config::BlasgenConfig;

#[derive(Parser)]
#[command(name = "blasgen", version, about = "Typed Rust binding generator for CBLAS declarations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the declaration corpus and write the configured output groups
    Generate {
        /// Explicit config path (default: search for blasgen.toml upward from cwd)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Generate a single named group
        #[arg(long)]
        group: Option<String>,
        /// Print each rendered file syntax-highlighted to the terminal
        #[arg(long)]
        preview: bool,
        /// Render and report without writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the decoded records of the declaration corpus
    List {
        /// Explicit config path (default: search for blasgen.toml upward from cwd)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Generate {
            config,
            group,
            preview,
            dry_run,
        } => {
            let (config, project_dir) = load_config(&cwd, config.as_deref())?;
            commands::generate::run(&project_dir, &config, group.as_deref(), preview, dry_run)
        }

        Commands::List { config, json } => {
            let (config, project_dir) = load_config(&cwd, config.as_deref())?;
            commands::list::run(&project_dir, &config, json)
        }
    }
}

/// Resolve the configuration: an explicit `--config` path, or the nearest
/// `blasgen.toml` walking up from the current directory.
fn load_config(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<(BlasgenConfig, PathBuf)> {
    match explicit {
        Some(path) => {
            let config = BlasgenConfig::load(path)?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf();
            Ok((config, dir))
        }
        None => BlasgenConfig::find_and_load(cwd)?
            .ok_or_else(|| anyhow::anyhow!("no blasgen.toml found in {} or any parent", cwd.display())),
    }
}
