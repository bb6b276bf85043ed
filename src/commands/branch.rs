//! # Branch Command
//!
//! List or create branches.
//!
//! ## Usage
//!
//! ```bash
//! gitingo branch
//! gitingo branch feature-branch
//! ```

use anyhow::{Context, Result};

use gitingo::refs;
use gitingo::Repository;

pub fn run(branch_name: Option<String>) -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    match branch_name {
        Some(name) => {
            refs::create_branch(&repo, &name).context("failed to create branch")?;
            println!("Created branch '{}'", name);
        }
        None => {
            let branches = refs::list_branches(&repo).context("failed to list branches")?;
            for branch in branches {
                if !repo.is_detached && branch == repo.current_branch {
                    println!("* {}", branch);
                } else {
                    println!("  {}", branch);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_branches_empty_repo() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        run(None).unwrap();
    }

    #[test]
    fn test_create_branch_requires_commit() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        assert!(run(Some("feature".to_string())).is_err());
    }
}
