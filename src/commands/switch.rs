//! # Switch Command
//!
//! Move between branches (or to a detached commit), rewriting the index and
//! working directory to match.
//!
//! ## Usage
//!
//! ```bash
//! gitingo switch feature
//! gitingo switch -c feature       # create and switch
//! gitingo switch a1b2c3d          # detached HEAD
//! ```

use anyhow::{bail, Context, Result};

use gitingo::diff;
use gitingo::index::Index;
use gitingo::objects::{commit, store};
use gitingo::{refs, tree};
use gitingo::Repository;

fn check_clean(repo: &Repository) -> Result<()> {
    let index = Index::load(repo)?;
    let workdir_index = Index::load_working_dir(repo)?;

    let head_index = match refs::read_head(repo)? {
        Some(commit_hash) => {
            let tree_hash = commit::read_tree_hash(repo, &commit_hash)?;
            tree::tree_to_index(repo, &tree_hash)?
        }
        None => Index::new(),
    };

    if !diff::diff(&head_index, &index).is_empty() || !diff::diff(&index, &workdir_index).is_empty() {
        log::warn!("switch blocked: working tree or index has uncommitted changes");
        bail!(gitingo::Error::DirtyWorkTree);
    }

    Ok(())
}

/// Rewrite the index and working directory to match a commit's tree.
fn checkout_commit(repo: &Repository, commit_hash: &str) -> Result<()> {
    let tree_hash = commit::read_tree_hash(repo, commit_hash)?;
    tree::checkout_tree(repo, &tree_hash)?;

    let mut index = Index::new();
    tree::parse_tree(repo, &tree_hash, "", &mut index)?;
    index.save(repo)?;

    Ok(())
}

pub fn run(target: &str, create: bool) -> Result<()> {
    let mut repo = Repository::find().context("not a gitingo repository")?;

    check_clean(&repo)?;

    if create {
        refs::create_branch(&repo, target).context("failed to create branch")?;
    }

    match refs::attach_head(&mut repo, target) {
        Ok(()) => {
            if let Some(hash) = refs::read_head(&repo)? {
                checkout_commit(&repo, &hash)?;
            }
            println!("Switched to branch '{}'", target);
        }
        Err(gitingo::Error::BranchNotExists(_)) if !create => {
            store::verify_object(&repo, target, "commit")?;
            checkout_commit(&repo, target)?;
            refs::detach_head(&mut repo, target)?;
            println!("Note: checking out '{}'.", &target[..7.min(target.len())]);
            println!("You are in 'detached HEAD' state.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
