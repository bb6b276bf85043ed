//! # Reset Command
//!
//! Move the current branch (or detached HEAD) to a given commit, with three
//! levels of side effect.
//!
//! ## Usage
//!
//! ```bash
//! gitingo reset --soft <hash>
//! gitingo reset --mixed <hash>
//! gitingo reset --hard <hash>
//! ```

use anyhow::{Context, Result};

use gitingo::index::Index;
use gitingo::objects::{commit, store};
use gitingo::{refs, tree};
use gitingo::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Soft,
    Mixed,
    Hard,
}

pub fn run(mode: Mode, hash: &str) -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    // Verified before any mutation in every mode: a bad hash must not leave
    // the index or HEAD partially updated.
    store::verify_object(&repo, hash, "commit").context("reset target is not a commit")?;

    let reflog_message = match mode {
        Mode::Soft => "reset --soft",
        Mode::Mixed => "reset --mixed",
        Mode::Hard => "reset --hard",
    };

    if mode != Mode::Soft {
        let tree_hash = commit::read_tree_hash(&repo, hash)?;
        let mut index = Index::new();
        tree::parse_tree(&repo, &tree_hash, "", &mut index)?;
        index.save(&repo)?;

        if mode == Mode::Hard {
            tree::checkout_tree(&repo, &tree_hash)?;
        }
    }

    refs::update_head_with_log(&repo, hash, reflog_message)?;
    println!("HEAD is now at {}", &hash[..7.min(hash.len())]);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitingo::objects::commit::{Author, Commit};
    use gitingo::{config, refs};
    use tempfile::tempdir;

    fn make_commit(repo: &Repository, message: &str, parent: Option<String>, file: &str, content: &[u8]) -> String {
        let (name, email) = config::author_identity(repo).unwrap();
        let author = Author::now(&name, &email);

        let blob_hash = store::write_object(repo, "blob", content).unwrap();
        let mut index = Index::new();
        index.entries.insert(
            file.to_string(),
            gitingo::index::IndexEntry { mode: gitingo::index::MODE_REGULAR.to_string(), hash: blob_hash },
        );
        let tree_hash = tree::write_tree(repo, &tree::to_tree(&index)).unwrap();

        let commit = Commit::new(tree_hash, parent, author, message.to_string());
        commit::write_commit(repo, &commit).unwrap()
    }

    #[test]
    fn test_soft_reset_leaves_index_untouched() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();

        let h1 = make_commit(&repo, "first", None, "a.txt", b"one");
        refs::update_head_with_log(&repo, &h1, "commit: first").unwrap();
        let h2 = make_commit(&repo, "second", Some(h1.clone()), "a.txt", b"two");
        refs::update_head_with_log(&repo, &h2, "commit: second").unwrap();

        let index_before = Index::load(&repo).unwrap();
        run(Mode::Soft, &h1).unwrap();
        let index_after = Index::load(&repo).unwrap();

        assert_eq!(index_before.entries, index_after.entries);
        assert_eq!(refs::read_head(&repo).unwrap(), Some(h1));
    }

    #[test]
    fn test_hard_reset_rewrites_workdir() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();

        let h1 = make_commit(&repo, "first", None, "a.txt", b"one");
        refs::update_head_with_log(&repo, &h1, "commit: first").unwrap();
        let h2 = make_commit(&repo, "second", Some(h1.clone()), "a.txt", b"two");
        refs::update_head_with_log(&repo, &h2, "commit: second").unwrap();

        run(Mode::Hard, &h1).unwrap();

        let content = std::fs::read(temp.path().join("a.txt")).unwrap();
        assert_eq!(content, b"one");
        assert_eq!(refs::read_head(&repo).unwrap(), Some(h1));
    }

    #[test]
    fn test_reset_rejects_non_commit_object() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();

        let blob_hash = store::write_object(&repo, "blob", b"not a commit").unwrap();
        assert!(run(Mode::Soft, &blob_hash).is_err());
    }
}
