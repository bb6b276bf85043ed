//! # Objects
//!
//! Gitingo has exactly three object kinds, all living in the content-addressed
//! store in [`store`]: blobs (raw file content, handled directly by `store`
//! and [`crate::index`]), trees (hierarchical directory snapshots, see
//! [`crate::tree`]), and commits (see [`commit`]).

pub mod commit;
pub mod store;

pub use commit::{Author, Commit};
