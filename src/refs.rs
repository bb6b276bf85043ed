//! # Ref & HEAD Manager
//!
//! Branches are files under `refs/heads/<name>` containing a commit hash.
//! HEAD is either attached to a branch (`ref: refs/heads/<name>\n`) or
//! detached (a bare commit hash). Every ref movement is appended to a reflog
//! at `logs/HEAD` (detached) or `logs/<branch>` (attached).

use std::fs;

use crate::error::{Error, Result};
use crate::Repository;

/// List all local branches, sorted by name.
pub fn list_branches(repo: &Repository) -> Result<Vec<String>> {
    let heads_dir = repo.heads_dir();
    if !heads_dir.exists() {
        return Ok(Vec::new());
    }

    let mut branches = Vec::new();
    for entry in fs::read_dir(&heads_dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            if let Some(name) = entry.file_name().to_str() {
                branches.push(name.to_string());
            }
        }
    }
    branches.sort();
    Ok(branches)
}

pub fn branch_exists(repo: &Repository, name: &str) -> bool {
    repo.heads_dir().join(name).is_file()
}

/// Create a branch at the current HEAD commit.
pub fn create_branch(repo: &Repository, name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') || name.contains(' ') {
        return Err(Error::InvalidArguments(format!("'{}' is not a valid branch name", name)));
    }

    let head = read_head(repo)?;
    let head = head.ok_or(Error::NoCommitYet)?;

    fs::write(repo.heads_dir().join(name), format!("{}\n", head))?;
    log::info!("created branch {} at {}", name, head);
    Ok(())
}

/// Read the commit hash a branch ref points to.
pub fn read_branch(repo: &Repository, name: &str) -> Result<String> {
    let path = repo.heads_dir().join(name);
    let content = fs::read_to_string(&path).map_err(|_| Error::BranchNotExists(name.to_string()))?;
    Ok(content.trim().to_string())
}

/// Attach HEAD to a branch. Fails if the branch doesn't exist.
pub fn attach_head(repo: &mut Repository, name: &str) -> Result<()> {
    if !branch_exists(repo, name) {
        return Err(Error::BranchNotExists(name.to_string()));
    }
    fs::write(repo.head_path(), format!("ref: refs/heads/{}\n", name))?;
    repo.current_branch = name.to_string();
    repo.is_detached = false;
    log::debug!("HEAD attached to {}", name);
    Ok(())
}

/// Detach HEAD at a specific commit hash.
pub fn detach_head(repo: &mut Repository, hash: &str) -> Result<()> {
    fs::write(repo.head_path(), format!("{}\n", hash))?;
    repo.current_branch.clear();
    repo.is_detached = true;
    log::debug!("HEAD detached at {}", hash);
    Ok(())
}

/// Read the commit hash HEAD currently resolves to, or `None` if there is no
/// commit yet (e.g. a freshly initialized branch with an empty ref file).
pub fn read_head(repo: &Repository) -> Result<Option<String>> {
    let hash = if repo.is_detached {
        fs::read_to_string(repo.head_path())?.trim().to_string()
    } else {
        let path = repo.heads_dir().join(&repo.current_branch);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)?.trim().to_string()
    };

    if hash.is_empty() {
        Ok(None)
    } else {
        Ok(Some(hash))
    }
}

/// Write a new commit hash to wherever HEAD currently resolves (the current
/// branch's ref file if attached, HEAD itself if detached). Does not touch
/// the reflog; see [`update_head_with_log`] for the logged variant used by
/// commit/reset.
pub fn write_head(repo: &Repository, hash: &str) -> Result<()> {
    if repo.is_detached {
        fs::write(repo.head_path(), format!("{}\n", hash))?;
    } else {
        fs::write(repo.heads_dir().join(&repo.current_branch), format!("{}\n", hash))?;
    }
    Ok(())
}

fn reflog_path(repo: &Repository) -> std::path::PathBuf {
    if repo.is_detached {
        repo.logs_dir().join("HEAD")
    } else {
        repo.logs_dir().join(&repo.current_branch)
    }
}

/// Advance wherever HEAD resolves to `new_hash`, then append a reflog line
/// `<old> <new> <message>\n` if there was a previous commit. The new hash is
/// written first so a crash between the two writes never leaves the reflog
/// recording a transition that never actually happened.
pub fn update_head_with_log(repo: &Repository, new_hash: &str, message: &str) -> Result<()> {
    let old_hash = read_head(repo)?;

    write_head(repo, new_hash)?;

    if let Some(old) = old_hash {
        let log_path = reflog_path(repo);
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = fs::read_to_string(&log_path).unwrap_or_default();
        content.push_str(&format!("{} {} {}\n", old, new_hash, message));
        fs::write(&log_path, content)?;
    }

    log::info!("{}: HEAD advanced to {}", message, new_hash);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_fake_commit(repo: &Repository) -> String {
        crate::objects::store::write_object(repo, "commit", b"tree abc\nauthor a <a> 1 +0000\ncommitter a <a> 1 +0000\n\nmsg\n").unwrap()
    }

    #[test]
    fn test_no_commit_yet() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        assert_eq!(read_head(&repo).unwrap(), None);
    }

    #[test]
    fn test_write_head_attached() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let hash = write_fake_commit(&repo);

        write_head(&repo, &hash).unwrap();
        assert_eq!(read_head(&repo).unwrap(), Some(hash));
    }

    #[test]
    fn test_attach_nonexistent_branch_fails() {
        let temp = tempdir().unwrap();
        let mut repo = Repository::init(temp.path()).unwrap();
        assert!(matches!(
            attach_head(&mut repo, "nope"),
            Err(Error::BranchNotExists(_))
        ));
    }

    #[test]
    fn test_detach_then_read_head() {
        let temp = tempdir().unwrap();
        let mut repo = Repository::init(temp.path()).unwrap();
        let hash = write_fake_commit(&repo);

        detach_head(&mut repo, &hash).unwrap();
        assert!(repo.is_detached);
        assert_eq!(read_head(&repo).unwrap(), Some(hash));
    }

    #[test]
    fn test_create_branch_requires_commit() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        assert!(matches!(create_branch(&repo, "feature"), Err(Error::NoCommitYet)));
    }

    #[test]
    fn test_reflog_appends_on_update() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let h1 = write_fake_commit(&repo);
        write_head(&repo, &h1).unwrap();

        let h2 = crate::objects::store::write_object(&repo, "commit", b"tree def\nauthor a <a> 2 +0000\ncommitter a <a> 2 +0000\n\nmsg2\n").unwrap();
        update_head_with_log(&repo, &h2, "commit: msg2").unwrap();

        let log_content = fs::read_to_string(repo.logs_dir().join("main")).unwrap();
        assert!(log_content.contains(&h1));
        assert!(log_content.contains(&h2));
    }
}
