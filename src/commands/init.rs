//! # Init Command
//!
//! Initialize a new gitingo repository.
//!
//! ## What it does
//!
//! Creates the `.gitingo` directory structure:
//!
//! ```text
//! .gitingo/
//! ├── HEAD           # "ref: refs/heads/main\n"
//! ├── config
//! ├── objects/       # object database (empty)
//! └── refs/
//!     └── heads/     # branch references
//! ```
//!
//! ## Usage
//!
//! ```bash
//! gitingo init
//! gitingo init /path/to/repo
//! ```

use std::path::Path;
use anyhow::{Context, Result};

use gitingo::Repository;

/// Execute the init command.
///
/// `path` defaults to the current directory.
pub fn run(path: Option<&Path>) -> Result<()> {
    let target = path.unwrap_or(Path::new("."));
    let repo = Repository::init(target).context("failed to initialize repository")?;
    println!("Initialized empty gitingo repository in {}", repo.gitdir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_command() {
        let temp = tempdir().unwrap();
        run(Some(temp.path())).unwrap();

        assert!(temp.path().join(".gitingo").exists());
        assert!(temp.path().join(".gitingo/objects").exists());
        assert!(temp.path().join(".gitingo/refs/heads").exists());

        let head = std::fs::read_to_string(temp.path().join(".gitingo/HEAD")).unwrap();
        assert_eq!(head, "ref: refs/heads/main\n");
    }
}
