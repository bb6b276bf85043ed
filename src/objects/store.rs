//! # Object Store
//!
//! The content-addressed heart of the repository. Every object - blob, tree,
//! or commit - is framed the same way Git frames its objects:
//!
//! ```text
//! <kind> SP <decimal-length> NUL <content>
//! ```
//!
//! The object's hash is the SHA-256 hex digest of the *framed* bytes, and the
//! framed bytes are what's written to disk, **uncompressed**, at
//! `objects/<hash[0:2]>/<hash[2:]>`. This intentionally diverges from Git,
//! which uses SHA-1 and zlib-compresses the frame; neither compression nor
//! SHA-1 compatibility is a goal here.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::Repository;

/// Frame `content` with its object `kind` the way every object on disk is
/// framed: `<kind> SP <len> NUL <content>`.
pub fn frame(kind: &str, content: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, content.len());
    let mut framed = Vec::with_capacity(header.len() + content.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(content);
    framed
}

/// Hash framed bytes with SHA-256, returning the lowercase hex digest.
pub fn hash_framed(framed: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(framed);
    hex::encode(hasher.finalize())
}

/// Hash `content` as if it were framed with the given `kind`, without writing
/// anything to disk. Used by the index/diff machinery to compute a working
/// tree file's would-be blob hash without staging it.
pub fn hash_content(kind: &str, content: &[u8]) -> String {
    hash_framed(&frame(kind, content))
}

fn object_path(repo: &Repository, hash: &str) -> Result<PathBuf> {
    if hash.len() < 6 {
        return Err(Error::ShortHash(hash.to_string()));
    }
    Ok(repo.objects_dir().join(&hash[..2]).join(&hash[2..]))
}

/// Write an object of the given `kind` to the store, returning its hash.
///
/// Writes are deduplicating: if an object with the same hash already exists
/// on disk, it is not rewritten (objects are immutable and a pure function of
/// their content, so this is always safe).
pub fn write_object(repo: &Repository, kind: &str, content: &[u8]) -> Result<String> {
    let framed = frame(kind, content);
    let hash = hash_framed(&framed);

    let path = repo.objects_dir().join(&hash[..2]).join(&hash[2..]);

    if path.exists() {
        log::debug!("object {} already present, skipping write", hash);
        return Ok(hash);
    }

    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, &framed)?;
    log::debug!("wrote new {} object {}", kind, hash);

    Ok(hash)
}

/// An object read back from the store: its kind and its unframed content.
pub struct RawObject {
    pub kind: String,
    pub content: Vec<u8>,
}

/// Read an object by hash, stripping the frame header.
pub fn read_object(repo: &Repository, hash: &str) -> Result<RawObject> {
    let path = object_path(repo, hash)?;
    let bytes =
        std::fs::read(&path).map_err(|_| Error::ObjectNotFound(hash.to_string()))?;

    let nul_pos = bytes
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::InvalidTreeEntry(hash.to_string()))?;

    let header = String::from_utf8_lossy(&bytes[..nul_pos]);
    let kind = header
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_string();
    let content = bytes[nul_pos + 1..].to_vec();

    Ok(RawObject { kind, content })
}

/// Verify that `hash` resolves to an object of kind `expected`, without
/// returning its content. Used by `reset` before any mutation.
pub fn verify_object(repo: &Repository, hash: &str, expected: &'static str) -> Result<()> {
    let obj = read_object(repo, hash)?;
    if obj.kind != expected {
        return Err(Error::WrongObjectKind {
            hash: hash.to_string(),
            expected,
            actual: obj.kind,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_frame_and_hash() {
        let framed = frame("blob", b"hi\n");
        assert_eq!(framed, b"blob 3\0hi\n");
        let hash = hash_framed(&framed);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_write_read_roundtrip() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let hash = write_object(&repo, "blob", b"hello").unwrap();
        let obj = read_object(&repo, &hash).unwrap();

        assert_eq!(obj.kind, "blob");
        assert_eq!(obj.content, b"hello");
    }

    #[test]
    fn test_write_is_idempotent() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let h1 = write_object(&repo, "blob", b"same content").unwrap();
        let h2 = write_object(&repo, "blob", b"same content").unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_read_missing_object() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let result = read_object(&repo, &"a".repeat(64));
        assert!(matches!(result, Err(Error::ObjectNotFound(_))));
    }

    #[test]
    fn test_short_hash_rejected() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let result = read_object(&repo, "abc");
        assert!(matches!(result, Err(Error::ShortHash(_))));
    }

    #[test]
    fn test_verify_wrong_kind() {
        let temp = tempdir().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let hash = write_object(&repo, "blob", b"hi").unwrap();
        let result = verify_object(&repo, &hash, "commit");
        assert!(matches!(result, Err(Error::WrongObjectKind { .. })));
    }
}
