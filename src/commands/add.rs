//! # Add Command
//!
//! Stage files for the next commit by adding them to the index.
//!
//! ## Usage
//!
//! ```bash
//! gitingo add file.txt
//! gitingo add file1.txt file2.txt
//! gitingo add .
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};

use gitingo::index::Index;
use gitingo::Repository;

pub fn run(paths: Vec<String>) -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    let mut index = Index::load(&repo).context("failed to load index")?;

    let resolved: Result<Vec<PathBuf>> = paths
        .into_iter()
        .map(|p| {
            let path = PathBuf::from(&p);
            let full = if path.is_absolute() { path } else { std::env::current_dir()?.join(&path) };
            full.canonicalize().with_context(|| format!("path does not exist: {}", p))
        })
        .collect();

    index.add_files(&repo, &resolved?).context("failed to stage paths")?;
    index.save(&repo).context("failed to write index")?;

    log::debug!("add: staged paths written to index");
    Ok(())
}
