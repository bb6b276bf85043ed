//! # Commit Object
//!
//! A commit is a textual object pointing at a tree, with at most one parent
//! (this core has no merges):
//!
//! ```text
//! tree <tree-hash>
//! parent <parent-hash>        # omitted for the first commit
//! author <name> <email> <unix-ts> +0000
//! committer <name> <email> <unix-ts> +0000
//!
//! <commit message>
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};

use crate::error::{Error, Result};
use crate::objects::store;
use crate::Repository;

/// An author or committer identity with a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub timestamp: u64,
    /// Always `+0000` in this implementation; retained as a field for
    /// round-trip fidelity with the on-disk format.
    pub timezone: String,
}

impl Author {
    /// Build an author with the current wall-clock time.
    pub fn now(name: &str, email: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            timezone: "+0000".to_string(),
        }
    }

    pub fn serialize(&self) -> String {
        format!("{} <{}> {} {}", self.name, self.email, self.timestamp, self.timezone)
    }

    /// Parse `Name <email> timestamp timezone`.
    pub fn parse(s: &str, commit_hash: &str) -> Result<Self> {
        let err = || Error::InvalidCommitObject(commit_hash.to_string(), "malformed author/committer line".into());

        let email_start = s.find('<').ok_or_else(err)?;
        let email_end = s.find('>').ok_or_else(err)?;

        let name = s[..email_start].trim().to_string();
        let email = s[email_start + 1..email_end].to_string();

        let rest: Vec<&str> = s[email_end + 1..].trim().split(' ').collect();
        if rest.len() < 2 {
            return Err(err());
        }

        let timestamp: u64 = rest[0].parse().map_err(|_| err())?;
        let timezone = rest[1].to_string();

        Ok(Self { name, email, timestamp, timezone })
    }

    /// Render the timestamp as a human-readable UTC date, the way `log`
    /// displays it.
    pub fn date_string(&self) -> String {
        Utc.timestamp_opt(self.timestamp as i64, 0)
            .single()
            .map(|dt| dt.format("%a %b %e %T %Y +0000").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

/// A commit object: a tree snapshot, an optional single parent, and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    pub tree: String,
    pub parent: Option<String>,
    pub author: Author,
    pub committer: Author,
    pub message: String,
}

impl Commit {
    pub fn new(tree: String, parent: Option<String>, author: Author, message: String) -> Self {
        let committer = author.clone();
        Self { tree, parent, author, committer, message }
    }

    pub fn serialize(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("tree {}", self.tree));

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }

        lines.push(format!("author {}", self.author.serialize()));
        lines.push(format!("committer {}", self.committer.serialize()));
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n") + "\n"
    }

    pub fn parse(content: &str, commit_hash: &str) -> Result<Self> {
        let mut tree = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        let mut lines = content.lines();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(hash) = line.strip_prefix("tree ") {
                tree = Some(hash.to_string());
            } else if let Some(hash) = line.strip_prefix("parent ") {
                parent = Some(hash.to_string());
            } else if let Some(rest) = line.strip_prefix("author ") {
                author = Some(Author::parse(rest, commit_hash)?);
            } else if let Some(rest) = line.strip_prefix("committer ") {
                committer = Some(Author::parse(rest, commit_hash)?);
            }
        }

        let message: String = lines.collect::<Vec<_>>().join("\n");

        Ok(Self {
            tree: tree.ok_or_else(|| {
                Error::InvalidCommitObject(commit_hash.to_string(), "missing tree header".into())
            })?,
            parent,
            author: author.ok_or_else(|| {
                Error::InvalidCommitObject(commit_hash.to_string(), "missing author".into())
            })?,
            committer: committer.ok_or_else(|| {
                Error::InvalidCommitObject(commit_hash.to_string(), "missing committer".into())
            })?,
            message,
        })
    }

    pub fn is_initial(&self) -> bool {
        self.parent.is_none()
    }
}

/// Write a commit object, returning its hash.
pub fn write_commit(repo: &Repository, commit: &Commit) -> Result<String> {
    store::write_object(repo, "commit", commit.serialize().as_bytes())
}

/// Read and parse the commit at `hash`.
pub fn read_commit(repo: &Repository, hash: &str) -> Result<Commit> {
    let obj = store::read_object(repo, hash)?;
    if obj.kind != "commit" {
        return Err(crate::Error::WrongObjectKind {
            hash: hash.to_string(),
            expected: "commit",
            actual: obj.kind,
        });
    }
    let text = String::from_utf8_lossy(&obj.content);
    Commit::parse(&text, hash)
}

/// Read just the `tree` header of a commit, without fully parsing it.
pub fn read_tree_hash(repo: &Repository, commit_hash: &str) -> Result<String> {
    Ok(read_commit(repo, commit_hash)?.tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_roundtrip() {
        let author = Author::now("Test", "test@test.com");
        let serialized = author.serialize();
        let parsed = Author::parse(&serialized, "deadbeef").unwrap();
        assert_eq!(parsed, author);
    }

    #[test]
    fn test_commit_roundtrip() {
        let author = Author {
            name: "Test".into(),
            email: "test@test.com".into(),
            timestamp: 1000,
            timezone: "+0000".into(),
        };
        let commit = Commit::new("abc123".into(), None, author, "Test message".into());

        let serialized = commit.serialize();
        let parsed = Commit::parse(&serialized, "deadbeef").unwrap();

        assert_eq!(parsed.tree, "abc123");
        assert!(parsed.parent.is_none());
        assert_eq!(parsed.message, "Test message");
    }

    #[test]
    fn test_commit_with_parent() {
        let author = Author {
            name: "Test".into(),
            email: "test@test.com".into(),
            timestamp: 1000,
            timezone: "+0000".into(),
        };
        let commit = Commit::new("abc123".into(), Some("def456".into()), author, "msg".into());
        let parsed = Commit::parse(&commit.serialize(), "deadbeef").unwrap();
        assert_eq!(parsed.parent, Some("def456".to_string()));
        assert!(!parsed.is_initial());
    }
}
