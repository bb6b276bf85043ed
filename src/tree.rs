//! # Tree
//!
//! The hierarchical projection of the flat [`crate::index::Index`]. Building
//! a tree splits each index path on `/`, threading intermediate components
//! into nested [`TreeNode`]s and placing the final component as a file entry
//! in the appropriate leaf.
//!
//! ## Serialized layout
//!
//! ```text
//! for each subdirectory, in lexicographic order:
//!     "40000" SP <name> NUL <32 raw bytes of subtree hash>
//! for each file, in lexicographic order:
//!     <mode> SP <name> NUL <32 raw bytes of blob hash>
//! ```
//!
//! Directories are always emitted before files. This ordering and the
//! recursive hashing of subtrees make the encoding canonical: two in-memory
//! trees with the same logical content always serialize to the same bytes,
//! and thus hash to the same value.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::index::{Index, IndexEntry, MODE_REGULAR};
use crate::objects::store;
use crate::Repository;

pub const MODE_TREE: &str = "40000";

/// An in-memory directory snapshot: files and subdirectories by name.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    pub files: BTreeMap<String, IndexEntry>,
    pub dirs: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, path: &str, entry: IndexEntry) {
        match path.split_once('/') {
            Some((first, rest)) => {
                self.dirs.entry(first.to_string()).or_default().insert(rest, entry);
            }
            None => {
                self.files.insert(path.to_string(), entry);
            }
        }
    }
}

/// Project a flat index into a hierarchical tree.
pub fn to_tree(index: &Index) -> TreeNode {
    let mut root = TreeNode::new();
    for (path, entry) in &index.entries {
        root.insert(path, entry.clone());
    }
    root
}

/// Serialize and write a tree node (and, recursively, its subtrees),
/// returning the root tree's hash.
pub fn write_tree(repo: &Repository, node: &TreeNode) -> Result<String> {
    let mut content = Vec::new();

    for (name, subnode) in &node.dirs {
        let sub_hash = write_tree(repo, subnode)?;
        let raw = hex::decode(&sub_hash).map_err(|_| Error::InvalidTreeEntry(sub_hash.clone()))?;
        content.extend_from_slice(MODE_TREE.as_bytes());
        content.push(b' ');
        content.extend_from_slice(name.as_bytes());
        content.push(0);
        content.extend_from_slice(&raw);
    }

    for (name, entry) in &node.files {
        let raw = hex::decode(&entry.hash).map_err(|_| Error::InvalidTreeEntry(entry.hash.clone()))?;
        content.extend_from_slice(entry.mode.as_bytes());
        content.push(b' ');
        content.extend_from_slice(name.as_bytes());
        content.push(0);
        content.extend_from_slice(&raw);
    }

    store::write_object(repo, "tree", &content)
}

/// Parse a tree object (recursively), flattening entries into `index` under
/// `base_path`.
pub fn parse_tree(repo: &Repository, hash: &str, base_path: &str, index: &mut Index) -> Result<()> {
    let obj = store::read_object(repo, hash)?;
    if obj.kind != "tree" {
        return Err(Error::WrongObjectKind { hash: hash.to_string(), expected: "tree", actual: obj.kind });
    }

    let content = &obj.content;
    let mut pos = 0;

    while pos < content.len() {
        let space_pos = content[pos..]
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| Error::InvalidTreeEntry(hash.to_string()))?;
        let mode = String::from_utf8_lossy(&content[pos..pos + space_pos]).to_string();
        pos += space_pos + 1;

        let nul_pos = content[pos..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::InvalidTreeEntry(hash.to_string()))?;
        let name = String::from_utf8_lossy(&content[pos..pos + nul_pos]).to_string();
        pos += nul_pos + 1;

        if pos + 32 > content.len() {
            return Err(Error::InvalidTreeEntry(hash.to_string()));
        }
        let entry_hash = hex::encode(&content[pos..pos + 32]);
        pos += 32;

        let full_path = if base_path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", base_path, name)
        };

        if mode == MODE_TREE {
            parse_tree(repo, &entry_hash, &full_path, index)?;
        } else {
            index.entries.insert(full_path, IndexEntry { mode, hash: entry_hash });
        }
    }

    Ok(())
}

/// Project a tree object's full contents into a fresh [`Index`].
pub fn tree_to_index(repo: &Repository, tree_hash: &str) -> Result<Index> {
    let mut index = Index::new();
    parse_tree(repo, tree_hash, "", &mut index)?;
    Ok(index)
}

/// Materialize a tree's files into the working directory, overwriting
/// whatever is there. Executable and symlink modes are simplified to regular
/// file writes (mode 0644) in this reverse path.
pub fn write_reverse(repo: &Repository, node: &TreeNode, base: &str) -> Result<()> {
    let base_dir = if base.is_empty() {
        repo.workdir.clone()
    } else {
        repo.workdir.join(base)
    };
    std::fs::create_dir_all(&base_dir)?;

    for (name, subnode) in &node.dirs {
        let sub_base = if base.is_empty() { name.clone() } else { format!("{}/{}", base, name) };
        write_reverse(repo, subnode, &sub_base)?;
    }

    for (name, entry) in &node.files {
        let obj = store::read_object(repo, &entry.hash)?;
        std::fs::write(base_dir.join(name), &obj.content)?;
    }

    Ok(())
}

/// Remove a workdir file that dropped out of the target tree, then prune any
/// parent directories left empty by the removal, the same way `index.rs`'s
/// prune-on-save cleans up vanished entries.
fn remove_stale_file(repo: &Repository, path: &str) -> Result<()> {
    let full = repo.workdir.join(path);
    if full.exists() {
        std::fs::remove_file(&full)?;
        log::debug!("removed stale workdir file {}", path);
    }

    let mut dir = full.parent();
    while let Some(d) = dir {
        if d == repo.workdir {
            break;
        }
        match std::fs::read_dir(d) {
            Ok(mut entries) if entries.next().is_none() => {
                std::fs::remove_dir(d)?;
                dir = d.parent();
            }
            _ => break,
        }
    }

    Ok(())
}

/// Convenience: build and materialize a tree straight from a tree hash,
/// overwriting the working directory to match it exactly - including
/// removing files that were present before but are absent from the target
/// tree.
pub fn checkout_tree(repo: &Repository, tree_hash: &str) -> Result<()> {
    let index = tree_to_index(repo, tree_hash)?;

    let previous = Index::load_working_dir(repo)?;
    for change in crate::diff::diff(&previous, &index) {
        if change.kind == crate::diff::ChangeKind::Deleted {
            remove_stale_file(repo, &change.path)?;
        }
    }

    let node = to_tree(&index);
    write_reverse(repo, &node, "")
}

#[allow(dead_code)]
fn file_entry(hash: &str) -> IndexEntry {
    IndexEntry { mode: MODE_REGULAR.to_string(), hash: hash.to_string() }
}
