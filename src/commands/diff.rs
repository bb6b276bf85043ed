//! # Diff Command
//!
//! Show changes between the index and the working directory. Reuses the same
//! classification `status` uses for its "changes not staged" section, then
//! for modified text files prints a short line-level hunk so the user can see
//! what actually changed.
//!
//! ## Usage
//!
//! ```bash
//! gitingo diff
//! ```

use anyhow::{Context, Result};

use gitingo::diff::{self, ChangeKind};
use gitingo::index::Index;
use gitingo::objects::store;
use gitingo::Repository;

/// A greedy, line-granularity matcher: walk both sequences, keeping a line
/// when it matches at the current position, otherwise emitting a delete from
/// old and an insert from new. Good enough for a short informational hunk;
/// not a full Myers/LCS diff.
fn line_diff(old: &[&str], new: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < old.len() || j < new.len() {
        if i < old.len() && j < new.len() && old[i] == new[j] {
            i += 1;
            j += 1;
        } else if i < old.len() && (j >= new.len() || !new[j..].contains(&old[i])) {
            out.push(format!("-{}", old[i]));
            i += 1;
        } else {
            out.push(format!("+{}", new[j]));
            j += 1;
        }
    }

    out
}

pub fn run() -> Result<()> {
    let repo = Repository::find().context("not a gitingo repository")?;

    let index = Index::load(&repo).context("failed to load index")?;
    let workdir_index = Index::load_working_dir(&repo).context("failed to scan working directory")?;

    let changes = diff::diff(&index, &workdir_index);

    for change in changes {
        match change.kind {
            ChangeKind::Deleted => {
                println!("deleted: {}", change.path);
            }
            ChangeKind::Modified => {
                println!("modified: {}", change.path);

                let old_hash = &index.entries[&change.path].hash;
                let old_content = store::read_object(&repo, old_hash)?.content;
                let new_content = std::fs::read(repo.workdir.join(&change.path))?;

                if let (Ok(old_text), Ok(new_text)) =
                    (String::from_utf8(old_content), String::from_utf8(new_content))
                {
                    let old_lines: Vec<&str> = old_text.lines().collect();
                    let new_lines: Vec<&str> = new_text.lines().collect();
                    for line in line_diff(&old_lines, &new_lines) {
                        println!("  {}", line);
                    }
                }
            }
            ChangeKind::Added => {} // untracked, not this command's concern
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_diff_identical() {
        let lines = vec!["a", "b"];
        assert!(line_diff(&lines, &lines).is_empty());
    }

    #[test]
    fn test_line_diff_modification() {
        let old = vec!["a", "b", "c"];
        let new = vec!["a", "x", "c"];
        let out = line_diff(&old, &new);
        assert_eq!(out, vec!["-b".to_string(), "+x".to_string()]);
    }
}
