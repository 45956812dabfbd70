//! Commitlint Git - Commit graph access
//!
//! This crate exposes the commit graph through the [`CommitGraph`] trait. It
//! ships a `git2`-backed [`GitRepo`] and an in-memory [`MemoryGraph`], plus the
//! lazy breadth-first log and the merge-base resolver used to bound a lint run.
//! It also manages the `commit-msg` hook that runs `commitlint check`.

mod graph;
pub mod hooks;
mod log;
mod memory;
mod merge_base;
mod repository;
pub mod types;

pub use graph::{CommitGraph, CommitStream};
pub use log::BreadthFirstLog;
pub use memory::MemoryGraph;
pub use merge_base::resolve_merge_base;
pub use repository::{GitRepo, Result};
pub use types::CommitInfo;
