//! # gitingo
//!
//! A minimal, Git-compatible-in-spirit version control tool: an object
//! store, a staging index, commits with a single optional parent, branches,
//! and the status/diff/checkout machinery that reconciles HEAD, the index,
//! and the working directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use gitingo::commands;
use gitingo::commands::reset::Mode as ResetMode;

/// gitingo - a small version control tool
#[derive(Parser)]
#[command(name = "gitingo")]
#[command(version = "0.1.0")]
#[command(about = "A minimal Git-like version control tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new repository
    Init {
        /// Directory to initialize (defaults to the current directory)
        path: Option<PathBuf>,
    },

    /// Stage files for the next commit
    Add {
        /// Files or directories to stage
        paths: Vec<String>,
    },

    /// Record staged changes as a new commit
    Commit {
        /// The commit message
        #[arg(short, long)]
        message: String,
    },

    /// Show the working tree status
    Status,

    /// Show changes between the index and the working directory
    Diff,

    /// Show commit history starting from HEAD
    Log,

    /// List branches, or create one at the current HEAD commit
    Branch {
        /// Name of the branch to create
        branch_name: Option<String>,
    },

    /// Switch to a branch, or to a commit in detached HEAD state
    Switch {
        /// Branch name or commit hash
        target: String,

        /// Create the branch if it doesn't exist
        #[arg(short = 'c', long)]
        create: bool,
    },

    /// Move HEAD (and optionally the index/working directory) to a commit
    Reset {
        #[command(flatten)]
        mode: ResetArgs,

        /// Commit hash to reset to
        hash: String,
    },

    /// View or set the committer identity
    Config {
        /// Set user.name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Set user.email
        #[arg(short = 'e', long)]
        email: Option<String>,
    },
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct ResetArgs {
    #[arg(long)]
    soft: bool,
    #[arg(long)]
    mixed: bool,
    #[arg(long)]
    hard: bool,
}

impl From<&ResetArgs> for ResetMode {
    fn from(args: &ResetArgs) -> Self {
        if args.soft {
            ResetMode::Soft
        } else if args.hard {
            ResetMode::Hard
        } else {
            ResetMode::Mixed
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            commands::init::run(path.as_deref())?;
        }

        Commands::Add { paths } => {
            commands::add::run(paths.clone())?;
        }

        Commands::Commit { message } => {
            commands::commit::run(message)?;
        }

        Commands::Status => {
            commands::status::run()?;
        }

        Commands::Diff => {
            commands::diff::run()?;
        }

        Commands::Log => {
            commands::log::run()?;
        }

        Commands::Branch { branch_name } => {
            commands::branch::run(branch_name.clone())?;
        }

        Commands::Switch { target, create } => {
            commands::switch::run(target, *create)?;
        }

        Commands::Reset { mode, hash } => {
            commands::reset::run(ResetMode::from(mode), hash)?;
        }

        Commands::Config { name, email } => {
            commands::config::run(name.clone(), email.clone())?;
        }
    }

    Ok(())
}
