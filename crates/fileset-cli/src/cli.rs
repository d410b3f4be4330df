//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// files - Glob-driven batch file operations for build scripts
#[derive(Parser, Debug)]
#[command(name = "files")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log what is done (-v: summaries, -vv: every entry)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Settings file (TOML, JSON or YAML)
    #[arg(long, global = true, env = "FILESET_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List paths matching a glob pattern
    List {
        /// Glob pattern, e.g. "src/**/*.rs"
        pattern: String,

        /// Only existing files
        #[arg(long, conflicts_with = "folders")]
        files: bool,

        /// Only existing folders
        #[arg(long)]
        folders: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Delete every matching file or folder
    Delete {
        /// Glob pattern
        pattern: String,
    },

    /// Move every match into a directory
    Move {
        /// Glob pattern
        pattern: String,

        /// Destination directory (created if missing)
        destination: PathBuf,
    },

    /// Copy every match into a directory
    Copy {
        /// Glob pattern
        pattern: String,

        /// Destination directory (created if missing)
        destination: PathBuf,
    },

    /// Print a hash of the matching path list
    Hash {
        /// Glob pattern
        pattern: String,

        /// Include each entry's modification time
        #[arg(long)]
        mtime: bool,

        /// Include each entry's size
        #[arg(long)]
        size: bool,
    },

    /// Print the content of a single matching file
    Cat {
        /// Glob pattern resolving to one file
        pattern: String,
    },

    /// Show size, modification time and kind of a single match
    Stat {
        /// Glob pattern resolving to one entry
        pattern: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write content to a file, creating parent folders
    Write {
        /// Target file
        path: String,

        /// Content to write
        content: String,
    },

    /// Append content to a file, creating it if missing
    Append {
        /// Target file
        path: String,

        /// Content to append
        content: String,

        /// Start on a new line if the file already has content
        #[arg(short, long)]
        new_line: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from::<[&str; 0], &str>([]);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_repeated_verbose_flag() {
        let cli = Cli::parse_from(["files", "-vv", "list", "*.rs"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_list_filters() {
        let cli = Cli::parse_from(["files", "list", "src/*", "--folders", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::List {
                pattern: "src/*".into(),
                files: false,
                folders: true,
                json: true,
            })
        );
    }

    #[test]
    fn list_filters_conflict() {
        let result = Cli::try_parse_from(["files", "list", "*", "--files", "--folders"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_move_command() {
        let cli = Cli::parse_from(["files", "move", "build/*.tmp", "trash/"]);
        assert_eq!(
            cli.command,
            Some(Commands::Move {
                pattern: "build/*.tmp".into(),
                destination: PathBuf::from("trash/"),
            })
        );
    }

    #[test]
    fn parse_append_new_line() {
        let cli = Cli::parse_from(["files", "append", "log.txt", "done", "-n"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Append { new_line: true, .. })
        ));
    }

    #[test]
    fn parse_hash_flags() {
        let cli = Cli::parse_from(["files", "hash", "src/**", "--mtime"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Hash {
                mtime: true,
                size: false,
                ..
            })
        ));
    }
}
