//! # Log Command
//!
//! Display commit history by walking the parent chain starting at HEAD.
//!
//! ## Usage
//!
//! ```bash
//! gitingo log
//! ```

use std::collections::HashSet;

use anyhow::{Context, Result};

use gitingo::objects::commit::{self, Commit};
use gitingo::refs;
use gitingo::Repository;

fn format_commit(commit: &Commit, hash: &str) -> String {
    let mut lines = vec![format!("commit {}", hash)];
    lines.push(format!("Author: {} <{}>", commit.author.name, commit.author.email));
    lines.push(format!("Date:   {}", commit.author.date_string()));
    lines.push(String::new());
    for line in commit.message.lines() {
        lines.push(format!("    {}", line));
    }
    lines.join("\n")
}

pub fn run() -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    let start = match refs::read_head(&repo)? {
        Some(hash) => hash,
        None => {
            println!(
                "fatal: your current branch '{}' does not have any commits yet",
                repo.current_branch
            );
            return Ok(());
        }
    };

    let mut visited = HashSet::new();
    let mut current = Some(start);

    while let Some(hash) = current {
        if !visited.insert(hash.clone()) {
            break; // cycle guard
        }

        let commit = commit::read_commit(&repo, &hash).context("failed to read commit")?;
        println!("{}", format_commit(&commit, &hash));
        println!();

        current = commit.parent.clone();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitingo::index::Index;
    use gitingo::objects::commit::Author;
    use gitingo::{config, refs, tree};
    use tempfile::tempdir;

    #[test]
    fn test_log_no_commits() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        run().unwrap();
    }

    #[test]
    fn test_log_walks_parent_chain() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        std::env::set_current_dir(temp.path()).unwrap();

        let (name, email) = config::author_identity(&repo).unwrap();
        let author = Author::now(&name, &email);

        let index = Index::new();
        let tree_hash = tree::write_tree(&repo, &tree::to_tree(&index)).unwrap();

        let c1 = Commit::new(tree_hash.clone(), None, author.clone(), "first".into());
        let h1 = commit::write_commit(&repo, &c1).unwrap();
        refs::update_head_with_log(&repo, &h1, "commit: first").unwrap();

        let c2 = Commit::new(tree_hash, Some(h1.clone()), author, "second".into());
        let h2 = commit::write_commit(&repo, &c2).unwrap();
        refs::update_head_with_log(&repo, &h2, "commit: second").unwrap();

        run().unwrap();
    }
}
