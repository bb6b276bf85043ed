//! # Gitingo - a minimal, content-addressed version control engine
//!
//! Gitingo is a small reimplementation of the core of Git: a
//! content-addressable object store layered beneath a three-way state
//! machine (working directory, staging index, commit history).
//!
//! ## Architecture Overview
//!
//! Every piece of data - file content, a directory snapshot, a commit - is
//! stored as an "object" identified by the SHA-256 hash of its framed bytes.
//! Unlike Git, objects are **not** zlib-compressed; see [`objects::store`].
//!
//! ### Object Types
//!
//! - **Blob**: raw file contents.
//! - **Tree**: hierarchical directory snapshot, see [`tree`].
//! - **Commit**: a tree plus metadata and an optional parent, see [`objects::commit`].
//!
//! ### Repository Structure
//!
//! ```text
//! .gitingo/
//! ├── HEAD            # "ref: refs/heads/<branch>\n" or a bare commit hash
//! ├── config           # [user] name/email
//! ├── description
//! ├── index            # staging area, see `index`
//! ├── hooks/
//! ├── info/
//! ├── objects/
//! │   └── <hh>/<hhhh...>   # framed, uncompressed object bytes
//! ├── refs/
//! │   └── heads/<branch>   # commit hash
//! └── logs/
//!     ├── HEAD
//!     └── <branch>
//! ```

pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod index;
pub mod objects;
pub mod refs;
pub mod tree;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// The name of the gitingo metadata directory (like `.git`).
pub const GIT_DIR: &str = ".gitingo";

/// The default branch created by `init`.
pub const INIT_BRANCH: &str = "main";

/// A handle onto an on-disk repository: a working directory paired with its
/// `.gitingo` metadata directory and the currently checked-out ref.
#[derive(Debug, Clone)]
pub struct Repository {
    /// The working directory root (where `.gitingo` lives).
    pub workdir: PathBuf,
    /// The `.gitingo` directory path.
    pub gitdir: PathBuf,
    /// Name of the currently attached branch; empty when detached.
    pub current_branch: String,
    /// Whether HEAD is currently detached (pointing at a bare commit hash).
    pub is_detached: bool,
}

impl Repository {
    /// Find the repository root by walking up from the current directory.
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::find_from(&current_dir)
    }

    /// Find the repository starting from a specific path.
    pub fn find_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            let gitdir = current.join(GIT_DIR);
            if gitdir.is_dir() {
                return Self::open_at(current, gitdir);
            }

            if !current.pop() {
                return Err(Error::NotARepository(start.to_path_buf()));
            }
        }
    }

    fn open_at(workdir: PathBuf, gitdir: PathBuf) -> Result<Self> {
        let mut repo = Self {
            workdir,
            gitdir,
            current_branch: String::new(),
            is_detached: false,
        };
        repo.reload_head()?;
        Ok(repo)
    }

    /// Re-read HEAD, refreshing `current_branch`/`is_detached`.
    pub fn reload_head(&mut self) -> Result<()> {
        let head_content = std::fs::read_to_string(self.head_path())?;
        let head_content = head_content.trim();

        if let Some(ref_path) = head_content.strip_prefix("ref: ") {
            let branch = ref_path
                .trim()
                .strip_prefix("refs/heads/")
                .unwrap_or(ref_path.trim())
                .to_string();
            self.current_branch = branch;
            self.is_detached = false;
        } else {
            self.current_branch.clear();
            self.is_detached = true;
        }

        Ok(())
    }

    /// Initialize a new repository at the given path.
    ///
    /// Creates the `.gitingo` directory structure:
    /// - `.gitingo/objects/` - object database
    /// - `.gitingo/refs/heads/` - branch references
    /// - `.gitingo/HEAD` - current branch pointer
    pub fn init(path: &Path) -> Result<Self> {
        let workdir = path.to_path_buf();
        let gitdir = workdir.join(GIT_DIR);

        if gitdir.exists() {
            return Err(Error::AlreadyInitialized(gitdir));
        }

        std::fs::create_dir_all(gitdir.join("objects"))?;
        std::fs::create_dir_all(gitdir.join("refs").join("heads"))?;
        std::fs::create_dir_all(gitdir.join("hooks"))?;
        std::fs::create_dir_all(gitdir.join("info"))?;
        std::fs::create_dir_all(gitdir.join("logs"))?;

        std::fs::write(
            gitdir.join("HEAD"),
            format!("ref: refs/heads/{}\n", INIT_BRANCH),
        )?;
        std::fs::write(gitdir.join("refs").join("heads").join(INIT_BRANCH), "")?;
        std::fs::write(gitdir.join("config"), "")?;
        std::fs::write(gitdir.join("description"), "")?;
        std::fs::write(gitdir.join("index"), "")?;

        log::info!("initialized empty gitingo repository in {}", gitdir.display());

        Self::open_at(workdir, gitdir)
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.gitdir.join("objects")
    }

    pub fn refs_dir(&self) -> PathBuf {
        self.gitdir.join("refs")
    }

    pub fn heads_dir(&self) -> PathBuf {
        self.refs_dir().join("heads")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.gitdir.join("logs")
    }

    pub fn head_path(&self) -> PathBuf {
        self.gitdir.join("HEAD")
    }

    pub fn index_path(&self) -> PathBuf {
        self.gitdir.join("index")
    }

    pub fn config_path(&self) -> PathBuf {
        self.gitdir.join("config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_structure() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        assert!(repo.gitdir.exists());
        assert!(repo.objects_dir().exists());
        assert!(repo.heads_dir().exists());
        assert!(repo.head_path().exists());
        assert_eq!(repo.current_branch, INIT_BRANCH);
        assert!(!repo.is_detached);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();
        assert!(matches!(
            Repository::init(temp.path()),
            Err(Error::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn test_find_from_nested_dir() {
        let temp = tempdir().unwrap();
        Repository::init(temp.path()).unwrap();

        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = Repository::find_from(&nested).unwrap();
        assert_eq!(repo.workdir, temp.path());
    }
}
