//! # Status Command
//!
//! Show the working tree status - what's staged, modified, or untracked.
//!
//! ## Usage
//!
//! ```bash
//! gitingo status
//! ```

use anyhow::{Context, Result};

use gitingo::diff::{self, ChangeKind};
use gitingo::index::Index;
use gitingo::{refs, tree};
use gitingo::Repository;

pub fn run() -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    let index = Index::load(&repo).context("failed to load index")?;
    let workdir_index = Index::load_working_dir(&repo).context("failed to scan working directory")?;

    let head_index = match refs::read_head(&repo)? {
        Some(commit_hash) => {
            let tree_hash = gitingo::objects::commit::read_tree_hash(&repo, &commit_hash)?;
            tree::tree_to_index(&repo, &tree_hash)?
        }
        None => Index::new(),
    };

    let status = diff::status(&head_index, &index, &workdir_index);

    if repo.is_detached {
        println!("HEAD detached");
    } else {
        println!("On branch {}", repo.current_branch);
    }
    println!();

    if status.staged.is_empty() && status.not_staged.is_empty() && status.untracked.is_empty() {
        println!("nothing to commit, working tree clean");
        return Ok(());
    }

    if !status.staged.is_empty() {
        println!("Changes to be committed:");
        for change in &status.staged {
            let label = match change.kind {
                ChangeKind::Added => "new file:  ",
                ChangeKind::Modified => "modified:  ",
                ChangeKind::Deleted => "deleted:   ",
            };
            println!("        {}{}", label, change.path);
        }
        println!();
    }

    if !status.not_staged.is_empty() {
        println!("Changes not staged for commit:");
        for change in &status.not_staged {
            let label = match change.kind {
                ChangeKind::Modified => "modified:  ",
                ChangeKind::Deleted => "deleted:   ",
                ChangeKind::Added => unreachable!("Added changes are reported as untracked"),
            };
            println!("        {}{}", label, change.path);
        }
        println!();
    }

    if !status.untracked.is_empty() {
        println!("Untracked files:");
        for path in &status.untracked {
            println!("        {}", path);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitingo::index::Index as GIndex;
    use tempfile::tempdir;

    #[test]
    fn test_status_clean_repo() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        run().unwrap();
    }

    #[test]
    fn test_status_untracked_file() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        std::fs::write(temp.path().join("new.txt"), b"x").unwrap();

        let workdir_index = GIndex::load_working_dir(&repo).unwrap();
        assert!(workdir_index.entries.contains_key("new.txt"));

        run().unwrap();
    }
}
