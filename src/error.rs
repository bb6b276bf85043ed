//! # Error Taxonomy
//!
//! Every fallible operation in the library crate returns [`Result<T>`], whose
//! error variants are enumerated here rather than left to ad-hoc `anyhow`
//! strings. The command facade (`src/commands/*`, `src/main.rs`) still works
//! in terms of `anyhow::Result` and converts these via `?` and `.context(..)`.

use std::path::PathBuf;
use thiserror::Error;

/// The error type returned by all `gitingo` library operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a gitingo repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("gitingo repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("your current branch does not have any commits yet")]
    NoCommitYet,

    #[error("branch '{0}' does not exist")]
    BranchNotExists(String),

    #[error("your local changes would be overwritten; commit or stash them before switching branches")]
    DirtyWorkTree,

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("object {hash} is a {actual}, expected a {expected}")]
    WrongObjectKind {
        hash: String,
        expected: &'static str,
        actual: String,
    },

    #[error("ambiguous or too-short object hash: {0}")]
    ShortHash(String),

    #[error("invalid tree entry in object {0}")]
    InvalidTreeEntry(String),

    #[error("invalid commit object {0}: {1}")]
    InvalidCommitObject(String, String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type Result<T> = std::result::Result<T, Error>;
