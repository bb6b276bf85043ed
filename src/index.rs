//! # Index (Staging Area)
//!
//! The index is a flat mapping `path -> (mode, blob-hash)` between the
//! working directory and commits. On disk it's a sorted text file, one entry
//! per line: `<mode> SP <hash> SP <path> LF`.

use std::collections::BTreeMap;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::objects::store;
use crate::Repository;

pub const MODE_REGULAR: &str = "100644";
pub const MODE_EXECUTABLE: &str = "100755";
pub const MODE_SYMLINK: &str = "120000";

/// A single staged file: its mode and blob hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub mode: String,
    pub hash: String,
}

/// The staging area: a sorted, flat `path -> entry` map.
#[derive(Debug, Clone, Default)]
pub struct Index {
    pub entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the on-disk index. A missing file is the ground state after
    /// `init` and parses to an empty index, not an error.
    pub fn load(repo: &Repository) -> Result<Self> {
        let path = repo.index_path();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let mut entries = BTreeMap::new();

        for line in content.lines() {
            let mut parts = line.splitn(3, ' ');
            let (Some(mode), Some(hash), Some(path)) = (parts.next(), parts.next(), parts.next()) else {
                continue; // skip malformed lines
            };
            entries.insert(
                path.to_string(),
                IndexEntry { mode: mode.to_string(), hash: hash.to_string() },
            );
        }

        Ok(Self { entries })
    }

    /// Synthesize an index from the live working directory, without writing
    /// any blobs. Used by status/diff to see what *would* be staged.
    pub fn load_working_dir(repo: &Repository) -> Result<Self> {
        let mut index = Self::new();
        index.add_from_path(repo, &repo.workdir.clone(), false)?;
        Ok(index)
    }

    /// Stage each of `paths` (file or directory) under `repo`.
    pub fn add_files(&mut self, repo: &Repository, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            if path.is_dir() {
                self.add_from_path(repo, path, true)?;
            } else {
                self.add_file(repo, path, true)?;
            }
        }
        Ok(())
    }

    /// Recursively add every file under `root`, skipping the gitdir.
    pub fn add_from_path(&mut self, repo: &Repository, root: &Path, write_blob: bool) -> Result<()> {
        let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
            !(e.file_type().is_dir() && (e.file_name() == ".gitingo" || e.file_name() == ".git"))
        });

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            if entry.file_type().is_file() || entry.file_type().is_symlink() {
                self.add_file(repo, path, write_blob)?;
            }
        }
        Ok(())
    }

    /// Stage a single file, computing its mode and blob hash.
    pub fn add_file(&mut self, repo: &Repository, full_path: &Path, write_blob: bool) -> Result<()> {
        let relative = match full_path.strip_prefix(&repo.workdir) {
            Ok(rel) => rel,
            Err(_) => full_path,
        };

        let rel_str = relative.to_string_lossy().replace('\\', "/");
        if rel_str.starts_with(".gitingo/") || rel_str == ".gitingo"
            || rel_str.starts_with(".git/") || rel_str == ".git"
        {
            return Ok(());
        }

        let metadata = std::fs::symlink_metadata(full_path)?;

        let (mode, content) = if metadata.file_type().is_symlink() {
            let target = std::fs::read_link(full_path)?;
            (MODE_SYMLINK.to_string(), target.to_string_lossy().into_owned().into_bytes())
        } else {
            let content = std::fs::read(full_path)?;
            let mode = if metadata.permissions().mode() & 0o111 != 0 {
                MODE_EXECUTABLE
            } else {
                MODE_REGULAR
            };
            (mode.to_string(), content)
        };

        let hash = if write_blob {
            store::write_object(repo, "blob", &content)?
        } else {
            store::hash_content("blob", &content)
        };

        let new_entry = IndexEntry { mode, hash };
        if self.entries.get(&rel_str) != Some(&new_entry) {
            self.entries.insert(rel_str, new_entry);
        }

        Ok(())
    }

    /// Drop any entry whose file has vanished from the working directory,
    /// then write the index out in sorted order.
    pub fn save(&mut self, repo: &Repository) -> Result<()> {
        let missing: Vec<String> = self
            .entries
            .keys()
            .filter(|path| !repo.workdir.join(path).exists())
            .cloned()
            .collect();

        for path in missing {
            log::debug!("pruning vanished index entry {}", path);
            self.entries.remove(&path);
        }

        let mut lines = String::new();
        for (path, entry) in &self.entries {
            lines.push_str(&format!("{} {} {}\n", entry.mode, entry.hash, path));
        }

        std::fs::write(repo.index_path(), lines)?;
        Ok(())
    }
}
