//! files CLI
//!
//! Glob-driven delete/move/copy/hash/read/write for build scripts.

mod cli;
mod commands;
mod error;
mod logging;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use fileset::{ConfigStore, Context, NormalizedPath, Settings, Verbosity};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let context = Arc::new(build_context(&cli)?);
    logging::init(&context.verbosity())
        .map_err(|e| CliError::user(format!("Failed to initialise logging: {e}")))?;
    tracing::debug!(verbosity = ?context.verbosity(), "Context ready");

    match cli.command {
        Some(cmd) => execute_command(&context, cmd),
        None => {
            println!("{} Glob-driven file operations", "files".green().bold());
            println!();
            println!("Run {} for available commands.", "files --help".cyan());
            Ok(())
        }
    }
}

/// Settings file first, then `-v` flags on top.
fn build_context(cli: &Cli) -> Result<Context> {
    let settings = match &cli.config {
        Some(path) => ConfigStore::new().load(&NormalizedPath::new(path))?,
        None => Settings::default(),
    };

    let context = Context::from_settings(&settings);
    match cli.verbose {
        0 => {}
        1 => context.set_verbosity(Verbosity::Threshold(1)),
        _ => context.set_verbosity(Verbosity::On),
    }
    Ok(context)
}

fn execute_command(context: &Arc<Context>, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List {
            pattern,
            files,
            folders,
            json,
        } => commands::run_list(context, &pattern, files, folders, json),
        Commands::Delete { pattern } => commands::run_delete(context, &pattern),
        Commands::Move {
            pattern,
            destination,
        } => commands::run_move(context, &pattern, &destination),
        Commands::Copy {
            pattern,
            destination,
        } => commands::run_copy(context, &pattern, &destination),
        Commands::Hash {
            pattern,
            mtime,
            size,
        } => commands::run_hash(context, &pattern, mtime, size),
        Commands::Cat { pattern } => commands::run_cat(context, &pattern),
        Commands::Stat { pattern, json } => commands::run_stat(context, &pattern, json),
        Commands::Write { path, content } => commands::run_write(context, &path, &content),
        Commands::Append {
            path,
            content,
            new_line,
        } => commands::run_append(context, &path, &content, new_line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn build_context_reads_settings_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("fileset.toml");
        fs::write(&config, "verbose = 2\nline_ending = \"crlf\"").unwrap();

        let cli = Cli::parse_from(["files", "--config", config.to_str().unwrap(), "list", "*"]);
        let context = build_context(&cli).unwrap();

        assert!(matches!(context.verbosity(), Verbosity::Threshold(2)));
        assert_eq!(context.line_ending(), fileset::LineEnding::CrLf);
    }

    #[test]
    fn verbose_flag_overrides_settings() {
        let cli = Cli::parse_from(["files", "-vv", "list", "*"]);
        let context = build_context(&cli).unwrap();
        assert!(matches!(context.verbosity(), Verbosity::On));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["files", "--config", "/nonexistent/fileset.toml", "list", "*"]);
        assert!(build_context(&cli).is_err());
    }
}
