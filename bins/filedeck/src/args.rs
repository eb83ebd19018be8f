//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Browse and manage files from the terminal
#[derive(Parser)]
#[command(name = "filedeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to .filedeck.toml, filedeck.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a directory (defaults to the storage root)
    Ls {
        dir: Option<PathBuf>,
    },

    /// Find entries whose name contains QUERY, case-insensitively
    Search {
        query: String,

        /// Directory to search below
        #[arg(long = "in", value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Show at most N results (never more than search.max_results)
        #[arg(short, long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Create a folder
    Mkdir {
        parent: PathBuf,
        name: String,
    },

    /// Rename an entry in place
    Rename {
        path: PathBuf,
        new_name: String,
    },

    /// Delete a file or a directory tree
    Rm {
        path: PathBuf,
    },

    /// Copy an entry into a directory
    Cp {
        src: PathBuf,
        dest_dir: PathBuf,

        /// Pick a free name like "a (copia 1).txt" instead of failing on collision
        #[arg(long)]
        resolve: bool,
    },

    /// Move an entry into a directory
    Mv {
        src: PathBuf,
        dest_dir: PathBuf,
    },

    /// Show details about an entry
    Info {
        path: PathBuf,
    },

    /// Print a text file
    Cat {
        path: PathBuf,
    },

    /// Open a file and record it as recently used
    Open {
        path: PathBuf,
    },

    /// Show recently opened files
    Recent {
        /// Forget all recent files
        #[arg(long)]
        clear: bool,
    },

    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Print the storage root and data directory
    Root,

    /// Interactive session with copy/move/paste
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum FavAction {
    /// List favorites
    List,
    /// Mark an entry as favorite
    Add { path: PathBuf },
    /// Unmark an entry
    Remove { path: PathBuf },
    /// Flip the favorite mark
    Toggle { path: PathBuf },
}

impl Command {
    /// Metric name for this command
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ls { .. } => "ls",
            Self::Search { .. } => "search",
            Self::Mkdir { .. } => "mkdir",
            Self::Rename { .. } => "rename",
            Self::Rm { .. } => "rm",
            Self::Cp { .. } => "cp",
            Self::Mv { .. } => "mv",
            Self::Info { .. } => "info",
            Self::Cat { .. } => "cat",
            Self::Open { .. } => "open",
            Self::Recent { .. } => "recent",
            Self::Fav { .. } => "fav",
            Self::Root => "root",
            Self::Shell => "shell",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_flags() {
        let cli = Cli::try_parse_from(["filedeck", "--json", "search", "report", "--in", "/r", "-l", "5"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Search { query, dir, limit } => {
                assert_eq!(query, "report");
                assert_eq!(dir, Some(PathBuf::from("/r")));
                assert_eq!(limit, Some(5));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["filedeck", "-vv", "root"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
