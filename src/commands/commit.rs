//! # Commit Command
//!
//! Create a commit from the staging area (index).
//!
//! ## Usage
//!
//! ```bash
//! gitingo commit -m "Commit message"
//! ```

use anyhow::{Context, Result};

use gitingo::config;
use gitingo::index::Index;
use gitingo::objects::commit::{Author, Commit};
use gitingo::refs;
use gitingo::tree;
use gitingo::Repository;

pub fn run(message: &str) -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    let index = Index::load(&repo).context("failed to load index")?;
    if index.entries.is_empty() {
        println!("nothing to commit, working tree clean");
        return Ok(());
    }

    let node = tree::to_tree(&index);
    let tree_hash = tree::write_tree(&repo, &node).context("failed to write tree")?;

    let parent = refs::read_head(&repo)?;

    let (name, email) = config::author_identity(&repo).context("failed to read author identity")?;
    let author = Author::now(&name, &email);

    let commit = Commit::new(tree_hash, parent, author, message.to_string());
    let commit_hash = gitingo::objects::commit::write_commit(&repo, &commit)
        .context("failed to write commit object")?;

    refs::update_head_with_log(&repo, &commit_hash, &format!("commit: {}", message))
        .context("failed to advance HEAD")?;

    let short_hash = &commit_hash[..7.min(commit_hash.len())];
    println!("[{}] {}", short_hash, message);
    println!(" {} file(s) changed", index.entries.len());

    Ok(())
}
