//! # Diff / Status
//!
//! Three indexes participate in reconciliation: the one projected from HEAD's
//! tree, the one parsed from disk, and the one synthesized live from the
//! working directory. `diff` is a pure, side-effect-free comparison between
//! any two of them.

use crate::index::Index;

/// The kind of change a path underwent between a `base` and `other` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Present in `other`, absent from `base`.
    Added,
    /// Present in both with a different hash.
    Modified,
    /// Present in `base`, absent from `other`.
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: String,
    pub kind: ChangeKind,
}

/// Compare two indexes and report every path that changed, added, or
/// disappeared going from `base` to `other`.
///
/// `diff(x, x)` is always empty.
pub fn diff(base: &Index, other: &Index) -> Vec<Change> {
    let mut changes = Vec::new();

    for (path, other_entry) in &other.entries {
        match base.entries.get(path) {
            None => changes.push(Change { path: path.clone(), kind: ChangeKind::Added }),
            Some(base_entry) if base_entry.hash != other_entry.hash || base_entry.mode != other_entry.mode => {
                changes.push(Change { path: path.clone(), kind: ChangeKind::Modified });
            }
            Some(_) => {}
        }
    }

    for path in base.entries.keys() {
        if !other.entries.contains_key(path) {
            changes.push(Change { path: path.clone(), kind: ChangeKind::Deleted });
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes
}

/// The three-way snapshot used by `status`: changes staged for commit
/// (HEAD -> index), changes not staged (index -> working dir), and untracked
/// paths (in the working dir but never staged).
pub struct Status {
    pub staged: Vec<Change>,
    pub not_staged: Vec<Change>,
    pub untracked: Vec<String>,
}

/// Compute full repository status from the three indexes. Performs no
/// writes.
pub fn status(head_index: &Index, index: &Index, workdir_index: &Index) -> Status {
    let staged = diff(head_index, index);

    let wd_changes = diff(index, workdir_index);
    let not_staged: Vec<Change> = wd_changes
        .iter()
        .filter(|c| c.kind != ChangeKind::Added)
        .cloned()
        .collect();
    let untracked: Vec<String> = wd_changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Added)
        .map(|c| c.path.clone())
        .collect();

    Status { staged, not_staged, untracked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexEntry, MODE_REGULAR};

    fn entry(hash: &str) -> IndexEntry {
        IndexEntry { mode: MODE_REGULAR.to_string(), hash: hash.to_string() }
    }

    #[test]
    fn test_diff_self_is_empty() {
        let mut index = Index::new();
        index.entries.insert("a.txt".into(), entry("aaa"));
        assert!(diff(&index, &index).is_empty());
    }

    #[test]
    fn test_diff_detects_added() {
        let base = Index::new();
        let mut other = Index::new();
        other.entries.insert("new.txt".into(), entry("aaa"));

        let changes = diff(&base, &other);
        assert_eq!(changes, vec![Change { path: "new.txt".into(), kind: ChangeKind::Added }]);
    }

    #[test]
    fn test_diff_detects_modified_and_deleted() {
        let mut base = Index::new();
        base.entries.insert("a.txt".into(), entry("aaa"));
        base.entries.insert("b.txt".into(), entry("bbb"));

        let mut other = Index::new();
        other.entries.insert("a.txt".into(), entry("zzz"));

        let changes = diff(&base, &other);
        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&Change { path: "a.txt".into(), kind: ChangeKind::Modified }));
        assert!(changes.contains(&Change { path: "b.txt".into(), kind: ChangeKind::Deleted }));
    }

    #[test]
    fn test_status_classifies_untracked_separately() {
        let head = Index::new();
        let index = Index::new();
        let mut workdir = Index::new();
        workdir.entries.insert("untracked.txt".into(), entry("aaa"));

        let status = status(&head, &index, &workdir);
        assert!(status.staged.is_empty());
        assert!(status.not_staged.is_empty());
        assert_eq!(status.untracked, vec!["untracked.txt".to_string()]);
    }
}
