//! Local persistence for the last known-good restaurant collection.
//!
//! # Responsibility
//! - Define the snapshot contract used by the retrieval fallback chain.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - One fixed key holds the whole collection; writes overwrite it.
//! - Unreadable snapshots surface as `InvalidData`, never as partial lists.

pub mod snapshot_repo;
